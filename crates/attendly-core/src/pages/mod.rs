//! Page-level state controllers.
//!
//! Each page owns its own cache copy of the collections it renders; no
//! state is shared across pages, so two pages can observe divergent views
//! of the employee collection until each reloads.
//!
//! Controllers follow a begin/finish protocol: `begin_*` flips the
//! in-flight flags and returns a generation token, the caller performs the
//! async work with the matching helper function, and `finish_*` applies
//! the result — unless a newer `begin_*` has bumped the generation in the
//! meantime, in which case the stale result is dropped on the floor.

pub mod attendance;
pub mod dashboard;
pub mod employees;

use attendly_api::{AttendanceRecord, DirectoryClient, Employee};

use crate::error::CoreError;

/// Fetch employees and attendance concurrently; first failure wins and
/// aborts the pair, so callers never install a half-updated cache.
pub async fn fetch_both(
    client: &DirectoryClient,
) -> Result<(Vec<Employee>, Vec<AttendanceRecord>), CoreError> {
    let (employees, attendance) = tokio::try_join!(
        client.list_employees(),
        client.list_attendance(None, None),
    )?;
    Ok((employees, attendance))
}
