use db::models::attendance_entry;
use db::models::person;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct AttendanceEntryResponse {
    pub id: i64,
    pub person_id: i64,
    /// ISO 8601 date-only, e.g. "2026-03-09".
    pub date: String,
    /// "HH:MM:SS" or null.
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub status: String,
}

impl From<attendance_entry::Model> for AttendanceEntryResponse {
    fn from(m: attendance_entry::Model) -> Self {
        Self {
            id: m.id,
            person_id: m.person_id,
            date: m.date.format("%Y-%m-%d").to_string(),
            check_in_time: m.check_in_time.map(|t| t.format("%H:%M:%S").to_string()),
            check_out_time: m.check_out_time.map(|t| t.format("%H:%M:%S").to_string()),
            status: match m.status {
                attendance_entry::Status::Present => "present".into(),
                attendance_entry::Status::Absent => "absent".into(),
            },
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct PersonSummary {
    pub id: i64,
    pub display_name: String,
    pub natural_key: String,
}

impl From<person::Model> for PersonSummary {
    fn from(p: person::Model) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name,
            natural_key: p.natural_key,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ScanResponse {
    /// "check_in" or "check_out".
    pub action: String,
    pub person: PersonSummary,
    pub entry: AttendanceEntryResponse,
}
