//! SQLite persistence for entry logs and attendance.

mod model;
mod repository;

pub use model::{AttendanceDB, EntryLogDB, NewAttendanceDB, NewEntryLogDB};
pub use repository::{AttendanceRepository, EntryLogRepository};
