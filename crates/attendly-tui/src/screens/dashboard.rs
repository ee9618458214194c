//! Dashboard screen — the three summary counters.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use attendly_api::DirectoryClient;
use attendly_core::pages::fetch_both;
use attendly_core::{DashboardPage, views};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DashboardScreen {
    page: DashboardPage,
    action_tx: Option<UnboundedSender<Action>>,
    client: Option<Arc<DirectoryClient>>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            page: DashboardPage::new(),
            action_tx: None,
            client: None,
        }
    }

    fn spawn_load(&mut self) {
        let (Some(tx), Some(client)) = (self.action_tx.clone(), self.client.clone()) else {
            return;
        };
        let token = self.page.begin_load();
        tokio::spawn(async move {
            let result = fetch_both(&client).await;
            let _ = tx.send(Action::DashboardLoaded { token, result });
        });
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let today = views::local_today();
        let summary = self.page.summary(&today);

        let block = Block::default()
            .title(" Summary ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: String, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<32}"), theme::table_row()),
                Span::styled(value, theme::title_style()),
            ])
        };
        let lines = vec![
            Line::default(),
            row(
                "Total Employees".into(),
                summary.total_employees.to_string(),
            ),
            Line::default(),
            row(
                "Total Attendance Records".into(),
                summary.total_records.to_string(),
            ),
            Line::default(),
            row(
                format!("Present Today ({today})"),
                summary.present_today.to_string(),
            ),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn init(
        &mut self,
        action_tx: UnboundedSender<Action>,
        client: Arc<DirectoryClient>,
    ) -> Result<()> {
        self.action_tx = Some(action_tx);
        self.client = Some(client);
        self.spawn_load();
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Reload => self.spawn_load(),
            Action::DashboardLoaded { token, result } => self.page.finish_load(token, result),
            _ => {}
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [status_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        if let Some(error) = &self.page.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(theme::error_style()),
                status_area,
            );
        } else if self.page.loading {
            frame.render_widget(
                Paragraph::new("Loading...").style(theme::key_hint()),
                status_area,
            );
        }

        // Suppress the summary while loading or errored.
        if !self.page.loading && self.page.error.is_none() {
            let [summary_area] = Layout::vertical([Constraint::Length(9)]).areas(body);
            self.render_summary(frame, summary_area);
        }
    }
}
