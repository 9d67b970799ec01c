pub mod m202608240001_create_people;
pub mod m202608240002_create_attendance_entries;
