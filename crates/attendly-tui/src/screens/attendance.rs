//! Attendance screen — employee roster with present-day counts, the
//! filterable record list, and the mark-attendance dialog.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use attendly_api::{AttendanceStatus, DirectoryClient};
use attendly_core::AttendancePage;
use attendly_core::pages::attendance::mark;
use attendly_core::pages::fetch_both;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, form};

pub struct AttendanceScreen {
    page: AttendancePage,
    table_state: TableState,
    // Mark dialog: date buffer plus which field holds focus (0 = date,
    // 1 = status selector).
    date_input: Input,
    focused_field: usize,
    // Date-filter editing happens inline in the records panel.
    filter_input: Input,
    editing_filter: bool,
    action_tx: Option<UnboundedSender<Action>>,
    client: Option<Arc<DirectoryClient>>,
}

impl AttendanceScreen {
    pub fn new() -> Self {
        Self {
            page: AttendancePage::new(),
            table_state: TableState::default(),
            date_input: Input::default(),
            focused_field: 0,
            filter_input: Input::default(),
            editing_filter: false,
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
            let _ = tx.send(Action::AttendanceLoaded { token, result });
        });
    }

    fn spawn_mark(&mut self) {
        let (Some(tx), Some(client)) = (self.action_tx.clone(), self.client.clone()) else {
            return;
        };
        self.page.form.date = self.date_input.value().to_owned();
        let Some((token, payload)) = self.page.begin_mark() else {
            return;
        };
        tokio::spawn(async move {
            let result = mark(&client, &payload).await;
            let _ = tx.send(Action::AttendanceMarked { token, result });
        });
    }

    fn select_next(&mut self) {
        if self.page.employees.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < self.page.employees.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.page.employees.is_empty() {
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    fn open_mark_dialog(&mut self) {
        let Some(employee) = self
            .table_state
            .selected()
            .and_then(|i| self.page.employees.get(i))
            .cloned()
        else {
            return;
        };
        self.page.open_mark_dialog(employee);
        self.date_input = Input::new(self.page.form.date.clone());
        self.focused_field = 0;
    }

    /// Advance the employee filter through (off, E1, E2, ...).
    fn cycle_employee_filter(&mut self) {
        let ids: Vec<&str> = self
            .page
            .employees
            .iter()
            .map(|e| e.employee_id.as_str())
            .collect();
        let next = if self.page.filter_employee.is_empty() {
            ids.first().copied()
        } else {
            match ids.iter().position(|id| *id == self.page.filter_employee) {
                Some(i) => ids.get(i + 1).copied(),
                None => None,
            }
        };
        self.page.filter_employee = next.unwrap_or_default().to_owned();
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.page.close_mark_dialog(),
            KeyCode::Enter => {
                if !self.page.submitting {
                    self.spawn_mark();
                }
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = (self.focused_field + 1) % 2;
            }
            KeyCode::Left | KeyCode::Right if self.focused_field == 1 => {
                self.page.form.status = match self.page.form.status {
                    AttendanceStatus::Present => AttendanceStatus::Absent,
                    AttendanceStatus::Absent => AttendanceStatus::Present,
                };
            }
            _ if self.focused_field == 0 => {
                self.date_input.handle_event(&CrosstermEvent::Key(key));
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.page.filter_date = self.filter_input.value().trim().to_owned();
                self.editing_filter = false;
            }
            KeyCode::Esc => {
                self.editing_filter = false;
            }
            _ => {
                self.filter_input.handle_event(&CrosstermEvent::Key(key));
            }
        }
    }

    fn render_employees(&mut self, frame: &mut Frame, area: Rect) {
        let counts = self.page.present_counts();
        let block = Block::default()
            .title(" Employees ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let header = Row::new(["ID", "Name", "Present Days"]).style(theme::table_header());
        let rows = self.page.employees.iter().map(|e| {
            let present = counts.get(&e.employee_id).copied().unwrap_or(0);
            Row::new(vec![
                Cell::from(e.employee_id.clone()),
                Cell::from(e.full_name.clone()),
                Cell::from(present.to_string()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .block(block);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_records(&mut self, frame: &mut Frame, area: Rect) {
        let records = self.page.filtered();

        let mut title = format!(" Records ({}) ", records.len());
        if !self.page.filter_date.is_empty() {
            title.push_str(&format!("date={} ", self.page.filter_date));
        }
        if !self.page.filter_employee.is_empty() {
            title.push_str(&format!("employee={} ", self.page.filter_employee));
        }

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if self.editing_filter {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let [input_area, rest] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);
            form::render_input(
                frame,
                input_area,
                "Filter by date (YYYY-MM-DD)",
                &self.filter_input,
                true,
                None,
            );
            self.render_record_rows(frame, rest, &records);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.render_record_rows(frame, inner, &records);
    }

    fn render_record_rows(
        &self,
        frame: &mut Frame,
        area: Rect,
        records: &[attendly_api::AttendanceRecord],
    ) {
        if records.is_empty() {
            frame.render_widget(
                Paragraph::new("No attendance records.").style(theme::key_hint()),
                area,
            );
            return;
        }
        let header = Row::new(["Employee", "Date", "Status"]).style(theme::table_header());
        let rows = records.iter().map(|r| {
            let status_style = match r.status {
                AttendanceStatus::Present => theme::present_style(),
                AttendanceStatus::Absent => theme::absent_style(),
            };
            Row::new(vec![
                Cell::from(self.page.employee_label(&r.employee_id)).style(theme::table_row()),
                Cell::from(r.date.clone()).style(theme::table_row()),
                Cell::from(r.status.to_string()).style(status_style),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(12),
                Constraint::Length(8),
            ],
        )
        .header(header);
        frame.render_widget(table, area);
    }

    fn render_dialog(&mut self, frame: &mut Frame, area: Rect) {
        let dialog = widgets::centered_rect(area, 46, 11);
        frame.render_widget(Clear, dialog);

        let target = self.page.selected.as_ref().map_or_else(String::new, |e| {
            self.page.employee_label(&e.employee_id)
        });
        let block = Block::default()
            .title(" Mark Attendance ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let [who_area, date_area, status_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("For ", theme::key_hint()),
                Span::styled(target, theme::table_row()),
            ])),
            who_area,
        );
        form::render_input(
            frame,
            date_area,
            "Date (YYYY-MM-DD)",
            &self.date_input,
            self.focused_field == 0,
            None,
        );
        form::render_selector(
            frame,
            status_area,
            "Status",
            &self.page.form.status.to_string(),
            self.focused_field == 1,
            None,
        );

        let hint = if self.page.submitting {
            "Submitting..."
        } else {
            "Enter submit  Tab switch field  Esc cancel"
        };
        frame.render_widget(Paragraph::new(hint).style(theme::key_hint()), hint_area);
    }
}

impl Component for AttendanceScreen {
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

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.page.dialog_open {
            self.handle_dialog_key(key);
            return Ok(None);
        }
        if self.editing_filter {
            self.handle_filter_key(key);
            return Ok(None);
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('m') => self.open_mark_dialog(),
            KeyCode::Char('f') => {
                self.filter_input = Input::new(self.page.filter_date.clone());
                self.editing_filter = true;
            }
            KeyCode::Char('e') => self.cycle_employee_filter(),
            KeyCode::Char('c') => self.page.clear_filters(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Reload => self.spawn_load(),
            Action::AttendanceLoaded { token, result } => {
                self.page.finish_load(token, result);
                if self
                    .table_state
                    .selected()
                    .is_some_and(|i| i >= self.page.employees.len())
                {
                    self.table_state.select(None);
                }
            }
            Action::AttendanceMarked { token, result } => {
                let succeeded = result.is_ok();
                self.page.finish_mark(token, result);
                // The caches only change through a completed reload.
                if succeeded {
                    self.spawn_load();
                }
            }
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

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(body);
        self.render_employees(frame, left);
        self.render_records(frame, right);

        if self.page.dialog_open {
            self.render_dialog(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.page.dialog_open || self.editing_filter
    }
}
