// attendly-api: Async Rust client for the HR directory REST service.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DirectoryClient;
pub use error::Error;
pub use models::{AttendanceRecord, AttendanceStatus, Employee, MarkAttendance, NewEmployee};
pub use transport::TransportConfig;
