//! State and business logic between `attendly-api` and the TUI.
//!
//! This crate owns everything the presentation layer should not:
//!
//! - **Page controllers** ([`pages`]) — one state machine per screen
//!   (`EmployeesPage`, `AttendancePage`, `DashboardPage`). Controllers are
//!   synchronous: every remote operation is split into a `begin_*`
//!   transition that hands out a generation token and a `finish_*`
//!   transition that applies the result. Results carrying a stale token
//!   are discarded, so a response that arrives after a newer load can
//!   never clobber fresh state. The actual I/O lives in async helper
//!   functions the caller drives however it likes (spawned tasks in the
//!   TUI, direct awaits in tests).
//!
//! - **Validation** ([`validate`]) — client-side field checks for the
//!   create-employee form. Purely local; a form that fails validation
//!   never reaches the network.
//!
//! - **Derived views** ([`views`]) — pure aggregation over the cached
//!   collections: per-employee present-day counts, filtered/sorted
//!   attendance, and the dashboard summary.
//!
//! - **Error normalization** ([`CoreError`]) — every remote failure is
//!   flattened to a single user-visible message, preferring the server's
//!   `detail` string over an operation-specific fallback.

pub mod config;
pub mod error;
pub mod model;
pub mod pages;
pub mod validate;
pub mod views;

pub use config::ServiceConfig;
pub use error::CoreError;
pub use model::Department;
pub use pages::attendance::AttendancePage;
pub use pages::dashboard::DashboardPage;
pub use pages::employees::EmployeesPage;
pub use validate::{EmployeeForm, FieldErrors};
pub use views::Summary;

// Re-export the wire types; they double as the domain model.
pub use attendly_api::{AttendanceRecord, AttendanceStatus, Employee, MarkAttendance, NewEmployee};
