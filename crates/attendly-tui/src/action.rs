//! All possible UI actions. Actions are the sole mechanism for state
//! mutation: key events map to actions, spawned fetch tasks post their
//! results back as actions carrying the controller's generation token.

use attendly_api::{AttendanceRecord, Employee};
use attendly_core::CoreError;

use crate::screen::ScreenId;

/// A destructive operation awaiting interactive y/n confirmation.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteEmployee {
        employee_id: String,
        full_name: String,
    },
}

impl ConfirmAction {
    /// Prompt text for the confirmation dialog.
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteEmployee {
                employee_id,
                full_name,
            } => format!("Delete employee {full_name} ({employee_id})?"),
        }
    }
}

/// Everything that can happen in the app loop.
#[derive(Debug)]
pub enum Action {
    // ── App lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    SwitchScreen(ScreenId),
    /// Reload the active screen's data.
    Reload,

    // ── Confirmation dialog ──
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    /// Dispatched to the Employees screen once the user confirmed.
    DeleteConfirmed { employee_id: String },

    // ── Fetch results (token = controller generation at begin time) ──
    EmployeesLoaded {
        token: u64,
        result: Result<Vec<Employee>, CoreError>,
    },
    EmployeeCreated {
        token: u64,
        result: Result<Vec<Employee>, CoreError>,
    },
    EmployeeDeleted {
        token: u64,
        employee_id: String,
        result: Result<(), CoreError>,
    },
    AttendanceLoaded {
        token: u64,
        result: Result<(Vec<Employee>, Vec<AttendanceRecord>), CoreError>,
    },
    AttendanceMarked {
        token: u64,
        result: Result<(), CoreError>,
    },
    DashboardLoaded {
        token: u64,
        result: Result<(Vec<Employee>, Vec<AttendanceRecord>), CoreError>,
    },
}

impl Action {
    /// The screen a fetch-result action is routed to, if any.
    pub fn target_screen(&self) -> Option<ScreenId> {
        match self {
            Self::EmployeesLoaded { .. }
            | Self::EmployeeCreated { .. }
            | Self::EmployeeDeleted { .. }
            | Self::DeleteConfirmed { .. } => Some(ScreenId::Employees),
            Self::AttendanceLoaded { .. } | Self::AttendanceMarked { .. } => {
                Some(ScreenId::Attendance)
            }
            Self::DashboardLoaded { .. } => Some(ScreenId::Dashboard),
            _ => None,
        }
    }
}
