// Wire types for the directory service.
//
// The service round-trips these verbatim, so they double as the domain
// model — there is no separate conversion layer.

use serde::{Deserialize, Serialize};

/// An employee record as stored by the directory service.
///
/// `id` is the server-assigned opaque identifier; `employee_id` is the
/// user-assigned business key and is what every other operation keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Daily attendance status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "title_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

/// One attendance record. `date` is ISO `YYYY-MM-DD`; it stays a string
/// because lexicographic order equals chronological order for this
/// fixed-width format and the service echoes it verbatim.
///
/// The service may hold several records for the same `(employee_id, date)`
/// pair — the client never deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub date: String,
    pub status: AttendanceStatus,
}

/// Request body for `POST /employees/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Request body for `POST /attendance/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendance {
    pub employee_id: String,
    pub date: String,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).expect("serialize"),
            "\"present\""
        );
        assert_eq!(
            serde_json::from_str::<AttendanceStatus>("\"absent\"").expect("deserialize"),
            AttendanceStatus::Absent
        );
    }

    #[test]
    fn status_displays_title_case() {
        assert_eq!(AttendanceStatus::Present.to_string(), "Present");
        assert_eq!(AttendanceStatus::Absent.to_string(), "Absent");
    }

    #[test]
    fn attendance_record_round_trips() {
        let json = r#"{"id":"7","employee_id":"E1","date":"2024-01-02","status":"present"}"#;
        let record: AttendanceRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.employee_id, "E1");
        assert_eq!(record.status, AttendanceStatus::Present);
    }
}
