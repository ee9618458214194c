// ── Dashboard page controller ──
//
// Read-only aggregator: one combined load, three summary counters.

use tracing::debug;

use attendly_api::{AttendanceRecord, Employee};

use crate::error::CoreError;
use crate::views::{self, Summary};

const LOAD_FALLBACK: &str = "Failed to load data";

/// State for the Dashboard screen. No mutation operations.
#[derive(Debug, Default)]
pub struct DashboardPage {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.generation += 1;
        self.generation
    }

    pub fn finish_load(
        &mut self,
        token: u64,
        result: Result<(Vec<Employee>, Vec<AttendanceRecord>), CoreError>,
    ) {
        if token != self.generation {
            debug!(token, "discarding stale dashboard load result");
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

    /// Summary counters against a supplied `today` date. The summary is
    /// only meaningful when neither loading nor errored — the caller
    /// suppresses it otherwise.
    pub fn summary(&self, today: &str) -> Summary {
        views::summarize(&self.employees, &self.attendance, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendly_api::AttendanceStatus;

    #[test]
    fn load_failure_surfaces_single_message() {
        let mut page = DashboardPage::new();
        let token = page.begin_load();
        page.finish_load(
            token,
            Err(CoreError::Server {
                status: 503,
                detail: None,
            }),
        );

        assert_eq!(page.error.as_deref(), Some("Failed to load data"));
        assert!(!page.loading);
    }

    #[test]
    fn summary_reflects_loaded_caches() {
        let mut page = DashboardPage::new();
        let token = page.begin_load();
        page.finish_load(
            token,
            Ok((
                vec![Employee {
                    id: "srv-E1".into(),
                    employee_id: "E1".into(),
                    full_name: "Ada".into(),
                    email: "ada@example.com".into(),
                    department: "engineering".into(),
                }],
                vec![AttendanceRecord {
                    id: "a1".into(),
                    employee_id: "E1".into(),
                    date: "2024-03-10".into(),
                    status: AttendanceStatus::Present,
                }],
            )),
        );

        let summary = page.summary("2024-03-10");
        assert_eq!(summary.total_employees, 1);
        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.present_today, 1);
    }
}
