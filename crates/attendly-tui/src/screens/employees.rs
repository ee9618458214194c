//! Employees screen — roster table, add-employee modal, delete flow.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use attendly_api::DirectoryClient;
use attendly_core::pages::employees::{create_and_reload, delete_employee, fetch_employees};
use attendly_core::{Department, EmployeesPage};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, form};

/// Modal field order: employee id, full name, email, department selector.
const FIELD_COUNT: usize = 4;

pub struct EmployeesScreen {
    page: EmployeesPage,
    table_state: TableState,
    // Modal editing state. The typed values live in tui_input buffers and
    // are copied into the controller form on submit.
    employee_id_input: Input,
    full_name_input: Input,
    email_input: Input,
    department: Option<Department>,
    focused_field: usize,
    action_tx: Option<UnboundedSender<Action>>,
    client: Option<Arc<DirectoryClient>>,
}

impl EmployeesScreen {
    pub fn new() -> Self {
        Self {
            page: EmployeesPage::new(),
            table_state: TableState::default(),
            employee_id_input: Input::default(),
            full_name_input: Input::default(),
            email_input: Input::default(),
            department: None,
            focused_field: 0,
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
            let result = fetch_employees(&client).await;
            let _ = tx.send(Action::EmployeesLoaded { token, result });
        });
    }

    fn spawn_submit(&mut self) {
        let (Some(tx), Some(client)) = (self.action_tx.clone(), self.client.clone()) else {
            return;
        };
        let payload = self.page.payload();
        let token = self.page.begin_submit();
        tokio::spawn(async move {
            let result = create_and_reload(&client, &payload).await;
            let _ = tx.send(Action::EmployeeCreated { token, result });
        });
    }

    fn spawn_delete(&mut self, employee_id: String) {
        let (Some(tx), Some(client)) = (self.action_tx.clone(), self.client.clone()) else {
            return;
        };
        let token = self.page.begin_remove();
        tokio::spawn(async move {
            let result = delete_employee(&client, &employee_id).await;
            let _ = tx.send(Action::EmployeeDeleted {
                token,
                employee_id,
                result,
            });
        });
    }

    fn selected_employee(&self) -> Option<&attendly_api::Employee> {
        self.table_state
            .selected()
            .and_then(|i| self.page.employees.get(i))
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

    fn open_modal(&mut self) {
        self.employee_id_input = Input::default();
        self.full_name_input = Input::default();
        self.email_input = Input::default();
        self.department = None;
        self.focused_field = 0;
        self.page.form = attendly_core::EmployeeForm::default();
        self.page.field_errors = attendly_core::FieldErrors::default();
        self.page.open_modal();
    }

    fn cycle_department(&mut self, forward: bool) {
        let current = self
            .department
            .and_then(|d| Department::ALL.iter().position(|c| *c == d));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => Department::ALL.len() - 1,
            (Some(i), true) => (i + 1) % Department::ALL.len(),
            (Some(i), false) => (i + Department::ALL.len() - 1) % Department::ALL.len(),
        };
        self.department = Some(Department::ALL[next]);
    }

    /// Copy the edit buffers into the controller form, validate, and
    /// submit when clean.
    fn submit(&mut self) {
        self.page.form.employee_id = self.employee_id_input.value().to_owned();
        self.page.form.full_name = self.full_name_input.value().to_owned();
        self.page.form.email = self.email_input.value().to_owned();
        self.page.form.department = self
            .department
            .map_or_else(String::new, |d| d.value().to_owned());
        if self.page.validate() && !self.page.submitting {
            self.spawn_submit();
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.page.close_modal();
                return None;
            }
            KeyCode::Enter => {
                self.submit();
                return None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
                return None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
                return None;
            }
            _ => {}
        }
        if self.focused_field == 3 {
            match key.code {
                KeyCode::Left => self.cycle_department(false),
                KeyCode::Right => self.cycle_department(true),
                _ => {}
            }
        } else {
            let input = match self.focused_field {
                0 => &mut self.employee_id_input,
                1 => &mut self.full_name_input,
                _ => &mut self.email_input,
            };
            input.handle_event(&CrosstermEvent::Key(key));
        }
        None
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Employees ({}) ", self.page.employees.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if self.page.employees.is_empty() && !self.page.loading {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("No employees yet. Press a to add one.").style(theme::key_hint()),
                inner,
            );
            return;
        }

        let header = Row::new(["ID", "Name", "Email", "Department"]).style(theme::table_header());
        let rows = self.page.employees.iter().map(|e| {
            Row::new(vec![
                Cell::from(e.employee_id.clone()),
                Cell::from(e.full_name.clone()),
                Cell::from(e.email.clone()),
                Cell::from(Department::label_for(&e.department)),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Min(24),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .block(block);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_modal(&mut self, frame: &mut Frame, area: Rect) {
        let modal = widgets::centered_rect(area, 52, 17);
        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(" Add Employee ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let [id_area, name_area, email_area, dept_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        form::render_input(
            frame,
            id_area,
            "Employee ID",
            &self.employee_id_input,
            self.focused_field == 0,
            self.page.field_errors.employee_id,
        );
        form::render_input(
            frame,
            name_area,
            "Full Name",
            &self.full_name_input,
            self.focused_field == 1,
            self.page.field_errors.full_name,
        );
        form::render_input(
            frame,
            email_area,
            "Email",
            &self.email_input,
            self.focused_field == 2,
            self.page.field_errors.email,
        );
        form::render_selector(
            frame,
            dept_area,
            "Department",
            self.department.map_or("(select)", Department::label),
            self.focused_field == 3,
            self.page.field_errors.department,
        );

        let hint = if self.page.submitting {
            "Submitting..."
        } else {
            "Enter submit  Tab next field  Esc cancel"
        };
        frame.render_widget(Paragraph::new(hint).style(theme::key_hint()), hint_area);
    }
}

impl Component for EmployeesScreen {
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
        if self.page.modal_open {
            return Ok(self.handle_modal_key(key));
        }
        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Char('a') => {
                self.open_modal();
                None
            }
            KeyCode::Char('d') => self.selected_employee().map(|e| {
                Action::ShowConfirm(ConfirmAction::DeleteEmployee {
                    employee_id: e.employee_id.clone(),
                    full_name: e.full_name.clone(),
                })
            }),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Reload => self.spawn_load(),
            Action::EmployeesLoaded { token, result } => {
                self.page.finish_load(token, result);
                self.clamp_selection();
            }
            Action::EmployeeCreated { token, result } => {
                self.page.finish_submit(token, result);
                self.clamp_selection();
            }
            Action::DeleteConfirmed { employee_id } => self.spawn_delete(employee_id),
            Action::EmployeeDeleted {
                token,
                employee_id,
                result,
            } => {
                self.page.finish_remove(token, &employee_id, result);
                self.clamp_selection();
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

        self.render_table(frame, body);
        if self.page.modal_open {
            self.render_modal(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.page.modal_open
    }
}

impl EmployeesScreen {
    /// Keep the cursor inside the table after the list shrinks.
    fn clamp_selection(&mut self) {
        match self.table_state.selected() {
            Some(_) if self.page.employees.is_empty() => self.table_state.select(None),
            Some(i) if i >= self.page.employees.len() => {
                self.table_state.select(Some(self.page.employees.len() - 1));
            }
            _ => {}
        }
    }
}
