//! Application orchestration: the event loop, global keybindings, action
//! routing, and the confirmation dialog overlay.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tokio::sync::mpsc;
use tracing::{debug, info};

use attendly_api::DirectoryClient;

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets;

const TICK_RATE: Duration = Duration::from_millis(250);
const RENDER_RATE: Duration = Duration::from_millis(33);

pub struct App {
    client: Arc<DirectoryClient>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    active_screen: ScreenId,
    /// A destructive action awaiting y/n. While set, all input goes to
    /// the confirmation overlay.
    pending_confirm: Option<ConfirmAction>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    should_quit: bool,
}

impl App {
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            client,
            screens: HashMap::new(),
            active_screen: ScreenId::default(),
            pending_confirm: None,
            action_tx,
            action_rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        for (id, mut screen) in screens::create_screens() {
            screen.init(self.action_tx.clone(), Arc::clone(&self.client))?;
            screen.set_focused(id == self.active_screen);
            self.screens.insert(id, screen);
        }

        let mut tui = Tui::new()?;
        tui.enter()?;
        let mut events = EventReader::new(TICK_RATE, RENDER_RATE);

        while !self.should_quit {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        let _ = self.action_tx.send(action);
                    }
                }
                Event::Resize(w, h) => {
                    let _ = self.action_tx.send(Action::Resize(w, h));
                }
                Event::Tick => {
                    let _ = self.action_tx.send(Action::Tick);
                }
                Event::Render => {
                    let _ = self.action_tx.send(Action::Render);
                }
            }

            // Drain everything queued by key handling and spawned tasks.
            while let Ok(action) = self.action_rx.try_recv() {
                if matches!(action, Action::Render) {
                    tui.draw(|frame| self.render(frame))?;
                } else {
                    self.process_action(action)?;
                }
            }
        }

        events.stop();
        tui.exit()?;
        info!("attendly exiting");
        Ok(())
    }

    // ── Key handling ────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits, even inside a modal.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        // The confirmation overlay eats everything until answered.
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        // A modal on the active screen takes precedence over globals.
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if screen.captures_input() {
                return screen.handle_key_event(key);
            }
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('r') => return Ok(Some(Action::Reload)),
            KeyCode::Tab => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            KeyCode::BackTab => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            KeyCode::Char('1') => return Ok(Some(Action::SwitchScreen(ScreenId::Dashboard))),
            KeyCode::Char('2') => return Ok(Some(Action::SwitchScreen(ScreenId::Employees))),
            KeyCode::Char('3') => return Ok(Some(Action::SwitchScreen(ScreenId::Attendance))),
            _ => {}
        }

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    // ── Action processing ───────────────────────────────────────────

    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.should_quit = true,
            // Render is drawn directly in the event loop; Tick is a
            // housekeeping no-op; the next draw picks up the new size.
            Action::Tick | Action::Render | Action::Resize(..) => {}
            Action::SwitchScreen(id) => self.switch_screen(id),
            Action::Reload => {
                self.forward(self.active_screen, Action::Reload)?;
            }
            Action::ShowConfirm(confirm) => {
                debug!(?confirm, "awaiting confirmation");
                self.pending_confirm = Some(confirm);
            }
            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    match confirm {
                        ConfirmAction::DeleteEmployee { employee_id, .. } => {
                            self.forward(
                                ScreenId::Employees,
                                Action::DeleteConfirmed { employee_id },
                            )?;
                        }
                    }
                }
            }
            Action::ConfirmNo => {
                self.pending_confirm = None;
            }
            other => {
                if let Some(target) = other.target_screen() {
                    self.forward(target, other)?;
                }
            }
        }
        Ok(())
    }

    fn forward(&mut self, target: ScreenId, action: Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&target) {
            if let Some(follow_up) = screen.update(action)? {
                let _ = self.action_tx.send(follow_up);
            }
        }
        Ok(())
    }

    fn switch_screen(&mut self, id: ScreenId) {
        if id == self.active_screen {
            return;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        if let Some(screen) = self.screens.get_mut(&id) {
            screen.set_focused(true);
        }
        self.active_screen = id;
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let [tab_area, body, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_tabs(frame, tab_area);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.render(frame, body);
        }
        self.render_hints(frame, hint_area);

        if let Some(confirm) = &self.pending_confirm {
            render_confirm(frame, confirm);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for id in ScreenId::ALL {
            let style = if id == self.active_screen {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {} {} ", id.number(), id.label()), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let pairs: &[(&str, &str)] = match self.active_screen {
            ScreenId::Dashboard => &[("r", "reload"), ("Tab", "next screen"), ("q", "quit")],
            ScreenId::Employees => &[
                ("a", "add"),
                ("d", "delete"),
                ("j/k", "move"),
                ("r", "reload"),
                ("q", "quit"),
            ],
            ScreenId::Attendance => &[
                ("m", "mark"),
                ("f", "date filter"),
                ("e", "employee filter"),
                ("c", "clear filters"),
                ("j/k", "move"),
                ("r", "reload"),
                ("q", "quit"),
            ],
        };
        let mut spans = Vec::new();
        for (key, desc) in pairs {
            spans.push(Span::styled(*key, theme::key_hint_key()));
            spans.push(Span::styled(format!(" {desc}  "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// The modal y/n confirmation overlay.
fn render_confirm(frame: &mut Frame, confirm: &ConfirmAction) {
    let area = widgets::centered_rect(frame.area(), 50, 5);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::error_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [prompt_area, hint_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(2)]).areas(inner);
    frame.render_widget(
        Paragraph::new(confirm.prompt()).style(theme::table_row()),
        prompt_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("y", theme::key_hint_key()),
            Span::styled(" confirm  ", theme::key_hint()),
            Span::styled("n", theme::key_hint_key()),
            Span::styled("/Esc cancel", theme::key_hint()),
        ])),
        hint_area,
    );
}
