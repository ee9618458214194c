// ── Derived views ──
//
// Pure aggregation over the cached collections. Nothing here mutates the
// caches or touches the network; controllers recompute these on demand.

use std::collections::HashMap;

use attendly_api::{AttendanceRecord, AttendanceStatus, Employee};

/// Count of `Present` records grouped by `employee_id`, over the full
/// cached attendance set (no date-range filtering). Employees with zero
/// present records do not appear in the map.
pub fn present_counts(records: &[AttendanceRecord]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for record in records {
        if record.status == AttendanceStatus::Present {
            *counts.entry(record.employee_id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// The cached attendance set restricted by optional equality filters,
/// sorted by `date` descending. Lexicographic comparison is correct
/// because dates are fixed-width ISO strings. Stable sort, so records
/// sharing a date keep their cache order.
pub fn filter_records(
    records: &[AttendanceRecord],
    date: Option<&str>,
    employee_id: Option<&str>,
) -> Vec<AttendanceRecord> {
    let mut filtered: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| date.is_none_or(|d| r.date == d))
        .filter(|r| employee_id.is_none_or(|e| r.employee_id == e))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// Dashboard summary counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_employees: usize,
    pub total_records: usize,
    /// Records dated `today` with status `Present`.
    pub present_today: usize,
}

/// Compute the dashboard summary against a supplied `today` date string
/// (callers pass [`local_today`]; tests pass fixtures).
pub fn summarize(employees: &[Employee], records: &[AttendanceRecord], today: &str) -> Summary {
    Summary {
        total_employees: employees.len(),
        total_records: records.len(),
        present_today: records
            .iter()
            .filter(|r| r.date == today && r.status == AttendanceStatus::Present)
            .count(),
    }
}

/// The client's current local calendar date as `YYYY-MM-DD`.
pub fn local_today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, employee_id: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_owned(),
            employee_id: employee_id.to_owned(),
            date: date.to_owned(),
            status,
        }
    }

    fn fixture() -> Vec<AttendanceRecord> {
        vec![
            record("a1", "E1", "2024-01-01", AttendanceStatus::Present),
            record("a2", "E1", "2024-01-02", AttendanceStatus::Absent),
            record("a3", "E2", "2024-01-01", AttendanceStatus::Present),
        ]
    }

    #[test]
    fn present_counts_distributes_by_employee() {
        let counts = present_counts(&fixture());
        assert_eq!(counts.get("E1"), Some(&1));
        assert_eq!(counts.get("E2"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn zero_present_employees_are_absent_from_counts() {
        let records = vec![record("a1", "E1", "2024-01-01", AttendanceStatus::Absent)];
        let counts = present_counts(&records);
        assert!(!counts.contains_key("E1"));
    }

    #[test]
    fn present_counts_sum_matches_present_records() {
        let records = fixture();
        let total: u32 = present_counts(&records).values().sum();
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        assert_eq!(total, u32::try_from(present).expect("small fixture"));
    }

    #[test]
    fn duplicate_records_are_counted_not_merged() {
        let records = vec![
            record("a1", "E1", "2024-01-01", AttendanceStatus::Present),
            record("a2", "E1", "2024-01-01", AttendanceStatus::Present),
        ];
        assert_eq!(present_counts(&records).get("E1"), Some(&2));
        assert_eq!(filter_records(&records, Some("2024-01-01"), None).len(), 2);
    }

    #[test]
    fn date_filter_returns_exact_subset() {
        let filtered = filter_records(&fixture(), Some("2024-01-01"), None);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date == "2024-01-01"));
        let mut ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["a1", "a3"]);
    }

    #[test]
    fn unfiltered_records_sort_by_date_descending() {
        let filtered = filter_records(&fixture(), None, None);
        assert_eq!(filtered[0].date, "2024-01-02");
        assert!(filtered.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn employee_filter_composes_with_date_filter() {
        let filtered = filter_records(&fixture(), Some("2024-01-01"), Some("E2"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a3");
    }

    #[test]
    fn summary_counts_present_today_only() {
        let employees = vec![Employee {
            id: "srv-E1".into(),
            employee_id: "E1".into(),
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            department: "engineering".into(),
        }];
        let summary = summarize(&employees, &fixture(), "2024-01-01");
        assert_eq!(summary.total_employees, 1);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.present_today, 2);

        let other_day = summarize(&employees, &fixture(), "2024-01-02");
        assert_eq!(other_day.present_today, 0);
    }

    #[test]
    fn local_today_is_iso_shaped() {
        let today = local_today();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
    }
}
