// ── Attendance page controller ──
//
// Two caches (employees + attendance) refreshed together, derived views
// over the joined data, and the mark-attendance dialog state.

use std::collections::HashMap;

use tracing::debug;

use attendly_api::{AttendanceRecord, AttendanceStatus, DirectoryClient, Employee, MarkAttendance};

use crate::error::CoreError;
use crate::views;

const LOAD_FALLBACK: &str = "Failed to load data";
const MARK_FALLBACK: &str = "Failed to mark attendance";

/// Values of the mark-attendance dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkForm {
    /// ISO `YYYY-MM-DD`, defaults to the current local calendar date.
    pub date: String,
    pub status: AttendanceStatus,
}

impl Default for MarkForm {
    fn default() -> Self {
        Self {
            date: views::local_today(),
            status: AttendanceStatus::Present,
        }
    }
}

/// State for the Attendance screen.
#[derive(Debug, Default)]
pub struct AttendancePage {
    /// Both caches refresh together (all-or-nothing), so one can never
    /// reflect new data while the other is stale.
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub loading: bool,
    pub error: Option<String>,
    /// Target employee of the mark dialog.
    pub selected: Option<Employee>,
    pub form: MarkForm,
    /// Empty string = no filter.
    pub filter_date: String,
    pub filter_employee: String,
    pub dialog_open: bool,
    pub submitting: bool,
    generation: u64,
}

impl AttendancePage {
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

    // ── Combined load ───────────────────────────────────────────────

    pub fn begin_load(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.bump()
    }

    /// Apply a combined load outcome: both collections or neither.
    pub fn finish_load(
        &mut self,
        token: u64,
        result: Result<(Vec<Employee>, Vec<AttendanceRecord>), CoreError>,
    ) {
        if self.is_stale(token) {
            debug!(token, "discarding stale attendance load result");
            return;
        }
        self.loading = false;
        match result {
            Ok((employees, attendance)) => {
                self.employees = employees;
                self.attendance = attendance;
            }
            Err(e) => self.error = Some(e.user_message(LOAD_FALLBACK)),
        }
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Present-day count per employee over the full cached set.
    pub fn present_counts(&self) -> HashMap<String, u32> {
        views::present_counts(&self.attendance)
    }

    /// The attendance cache restricted by the current filters, sorted by
    /// date descending. Does not mutate the cache.
    pub fn filtered(&self) -> Vec<AttendanceRecord> {
        let date = (!self.filter_date.is_empty()).then_some(self.filter_date.as_str());
        let employee = (!self.filter_employee.is_empty()).then_some(self.filter_employee.as_str());
        views::filter_records(&self.attendance, date, employee)
    }

    pub fn clear_filters(&mut self) {
        self.filter_date.clear();
        self.filter_employee.clear();
    }

    /// Display name for a record's employee; unknown ids render verbatim.
    pub fn employee_label(&self, employee_id: &str) -> String {
        self.employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .map_or_else(
                || employee_id.to_owned(),
                |e| format!("{} ({})", e.full_name, employee_id),
            )
    }

    // ── Mark dialog ─────────────────────────────────────────────────

    /// Open the dialog for one employee, resetting the form to defaults.
    pub fn open_mark_dialog(&mut self, employee: Employee) {
        self.selected = Some(employee);
        self.form = MarkForm::default();
        self.dialog_open = true;
    }

    pub fn close_mark_dialog(&mut self) {
        self.dialog_open = false;
    }

    /// Start a mark submission. Returns `None` (and does nothing) when no
    /// employee is selected; otherwise the token and payload to submit.
    pub fn begin_mark(&mut self) -> Option<(u64, MarkAttendance)> {
        let selected = self.selected.as_ref()?;
        let payload = MarkAttendance {
            employee_id: selected.employee_id.clone(),
            date: self.form.date.clone(),
            status: self.form.status,
        };
        self.submitting = true;
        self.error = None;
        Some((self.bump(), payload))
    }

    /// Apply the mark outcome. Success closes the dialog; the caller is
    /// expected to start a fresh combined load. Failure keeps the dialog
    /// open with the error shown. Either way the caches are untouched
    /// here — only a completed reload replaces them.
    pub fn finish_mark(&mut self, token: u64, result: Result<(), CoreError>) {
        if self.is_stale(token) {
            debug!(token, "discarding stale mark result");
            return;
        }
        self.submitting = false;
        match result {
            Ok(()) => self.dialog_open = false,
            Err(e) => self.error = Some(e.user_message(MARK_FALLBACK)),
        }
    }
}

// ── Async helpers ────────────────────────────────────────────────────

/// Submit one attendance record. The caller follows a success with a
/// fresh combined load ([`super::fetch_both`]).
pub async fn mark(client: &DirectoryClient, payload: &MarkAttendance) -> Result<(), CoreError> {
    Ok(client.mark_attendance(payload).await?)
}
