// ── Employees page controller ──
//
// Cache of the employee collection plus the add-employee modal state.
// Create reconciles by full reload; delete updates the cache optimistically.

use tracing::debug;

use attendly_api::{DirectoryClient, Employee, NewEmployee};

use crate::error::CoreError;
use crate::validate::{self, EmployeeForm, FieldErrors};

const LOAD_FALLBACK: &str = "Failed to load employees";
const CREATE_FALLBACK: &str = "Failed to create employee";
const DELETE_FALLBACK: &str = "Failed to delete employee";

/// State for the Employees screen.
#[derive(Debug, Default)]
pub struct EmployeesPage {
    /// Cached employee list. Stale-but-visible: a failed reload leaves the
    /// previous cache untouched.
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
    pub form: EmployeeForm,
    pub field_errors: FieldErrors,
    pub modal_open: bool,
    pub submitting: bool,
    generation: u64,
}

impl EmployeesPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn is_stale(&self, token: u64) -> bool {
        token != self.generation
    }

    // ── Load ────────────────────────────────────────────────────────

    /// Start a load. Returns the token to pass back to [`finish_load`].
    pub fn begin_load(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.bump()
    }

    pub fn finish_load(&mut self, token: u64, result: Result<Vec<Employee>, CoreError>) {
        if self.is_stale(token) {
            debug!(token, "discarding stale employee load result");
            return;
        }
        self.loading = false;
        match result {
            Ok(employees) => self.employees = employees,
            Err(e) => self.error = Some(e.user_message(LOAD_FALLBACK)),
        }
    }

    // ── Create modal ────────────────────────────────────────────────

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    /// Close without submitting. Entered values are kept, matching the
    /// failure path — only a successful create clears the form.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Run client-side validation against the current cache.
    /// Returns `true` iff the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.field_errors = validate::validate(&self.form, &self.employees);
        self.field_errors.is_empty()
    }

    /// The trimmed payload for submission. Callers must have validated.
    pub fn payload(&self) -> NewEmployee {
        self.form.trimmed_payload()
    }

    pub fn begin_submit(&mut self) -> u64 {
        self.submitting = true;
        self.error = None;
        self.bump()
    }

    /// Apply the create-and-reload outcome. Success installs the fresh
    /// list, closes the modal, and clears the form; failure keeps the
    /// modal open with the entered values intact.
    pub fn finish_submit(&mut self, token: u64, result: Result<Vec<Employee>, CoreError>) {
        if self.is_stale(token) {
            debug!(token, "discarding stale create result");
            return;
        }
        self.submitting = false;
        match result {
            Ok(employees) => {
                self.employees = employees;
                self.modal_open = false;
                self.form = EmployeeForm::default();
                self.field_errors = FieldErrors::default();
            }
            Err(e) => self.error = Some(e.user_message(CREATE_FALLBACK)),
        }
    }

    // ── Delete ──────────────────────────────────────────────────────

    /// Start a delete. The interactive confirmation happens in the
    /// presentation layer before this is called.
    pub fn begin_remove(&mut self) -> u64 {
        self.error = None;
        self.bump()
    }

    /// Apply a delete outcome. Success removes the matching entry from
    /// the cache directly (optimistic, no reload); failure leaves the
    /// cache unchanged.
    pub fn finish_remove(&mut self, token: u64, employee_id: &str, result: Result<(), CoreError>) {
        if self.is_stale(token) {
            debug!(token, "discarding stale delete result");
            return;
        }
        match result {
            Ok(()) => self.employees.retain(|e| e.employee_id != employee_id),
            Err(e) => self.error = Some(e.user_message(DELETE_FALLBACK)),
        }
    }
}

// ── Async helpers ────────────────────────────────────────────────────

/// Fetch the employee collection.
pub async fn fetch_employees(client: &DirectoryClient) -> Result<Vec<Employee>, CoreError> {
    Ok(client.list_employees().await?)
}

/// Create an employee, then re-fetch the full list.
///
/// The extra reload (on top of the adapter's own reconcile step)
/// guarantees the cache reflects server-assigned fields and any
/// server-side normalization, rather than trusting an optimistic insert.
pub async fn create_and_reload(
    client: &DirectoryClient,
    payload: &NewEmployee,
) -> Result<Vec<Employee>, CoreError> {
    client.create_employee(payload).await?;
    Ok(client.list_employees().await?)
}

/// Delete an employee by business key.
pub async fn delete_employee(client: &DirectoryClient, employee_id: &str) -> Result<(), CoreError> {
    Ok(client.delete_employee(employee_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(employee_id: &str) -> Employee {
        Employee {
            id: format!("srv-{employee_id}"),
            employee_id: employee_id.to_owned(),
            full_name: "Someone".into(),
            email: "someone@example.com".into(),
            department: "engineering".into(),
        }
    }

    #[test]
    fn failed_load_keeps_stale_cache_visible() {
        let mut page = EmployeesPage::new();
        let token = page.begin_load();
        page.finish_load(token, Ok(vec![employee("E1")]));

        let token = page.begin_load();
        page.finish_load(
            token,
            Err(CoreError::Transport {
                reason: "connection refused".into(),
            }),
        );

        assert_eq!(page.employees.len(), 1);
        assert_eq!(page.error.as_deref(), Some("Failed to load employees"));
        assert!(!page.loading);
    }

    #[test]
    fn stale_load_result_is_discarded() {
        let mut page = EmployeesPage::new();
        let old = page.begin_load();
        let fresh = page.begin_load();

        page.finish_load(old, Ok(vec![employee("E1")]));
        assert!(page.employees.is_empty(), "stale result must not apply");
        assert!(page.loading, "fresh load still in flight");

        page.finish_load(fresh, Ok(vec![employee("E2")]));
        assert_eq!(page.employees[0].employee_id, "E2");
    }

    #[test]
    fn successful_submit_closes_modal_and_clears_form() {
        let mut page = EmployeesPage::new();
        page.open_modal();
        page.form = EmployeeForm {
            employee_id: "E1".into(),
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            department: "engineering".into(),
        };
        assert!(page.validate());

        let token = page.begin_submit();
        page.finish_submit(token, Ok(vec![employee("E1")]));

        assert!(!page.modal_open);
        assert_eq!(page.form, EmployeeForm::default());
        assert_eq!(page.employees.len(), 1);
    }

    #[test]
    fn failed_submit_keeps_modal_open_with_values() {
        let mut page = EmployeesPage::new();
        page.open_modal();
        page.form.employee_id = "E1".into();

        let token = page.begin_submit();
        page.finish_submit(
            token,
            Err(CoreError::Server {
                status: 409,
                detail: Some("employee_id already taken".into()),
            }),
        );

        assert!(page.modal_open);
        assert_eq!(page.form.employee_id, "E1");
        assert_eq!(page.error.as_deref(), Some("employee_id already taken"));
    }

    #[test]
    fn successful_remove_deletes_only_matching_entry() {
        let mut page = EmployeesPage::new();
        page.employees = vec![employee("E1"), employee("E2"), employee("E3")];

        let token = page.begin_remove();
        page.finish_remove(token, "E2", Ok(()));

        let ids: Vec<&str> = page.employees.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(ids, ["E1", "E3"]);
        assert!(page.error.is_none());
    }

    #[test]
    fn failed_remove_leaves_cache_unchanged() {
        let mut page = EmployeesPage::new();
        page.employees = vec![employee("E1")];

        let token = page.begin_remove();
        page.finish_remove(
            token,
            "E1",
            Err(CoreError::Server {
                status: 500,
                detail: None,
            }),
        );

        assert_eq!(page.employees.len(), 1);
        assert_eq!(page.error.as_deref(), Some("Failed to delete employee"));
    }

    #[test]
    fn validation_failure_sets_field_errors() {
        let mut page = EmployeesPage::new();
        page.employees = vec![employee("E1")];
        page.form = EmployeeForm {
            employee_id: "E1".into(),
            full_name: "Dup".into(),
            email: "dup@example.com".into(),
            department: "hr".into(),
        };

        assert!(!page.validate());
        assert_eq!(
            page.field_errors.employee_id,
            Some("Employee ID must be unique")
        );
    }
}
