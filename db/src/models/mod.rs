pub mod attendance_entry;
pub mod person;
