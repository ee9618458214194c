//! Screen implementations. Each screen is a top-level Component.

pub mod attendance;
pub mod dashboard;
pub mod employees;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create the screen components for the tab bar.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
        (
            ScreenId::Employees,
            Box::new(employees::EmployeesScreen::new()),
        ),
        (
            ScreenId::Attendance,
            Box::new(attendance::AttendanceScreen::new()),
        ),
    ]
}
