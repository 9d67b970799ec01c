use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::AttendanceEntryResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use db::models::attendance_entry::Model as AttendanceEntry;
use db::models::person::Category;

#[derive(Debug, Serialize, Default)]
pub struct CodeResponse {
    pub code: String,
    pub generated_at_millis: i64,
    pub window_millis: i64,
    pub millis_remaining: i64,
}

/// GET /attendance/code
///
/// Faculty display endpoint: the code currently being rotated, plus how
/// long it stays fresh. The frontend re-polls when `millis_remaining`
/// runs out.
pub async fn get_current_code(State(state): State<AppState>) -> impl IntoResponse {
    let code = state.current_code();
    let now_millis = Utc::now().timestamp_millis();

    let data = CodeResponse {
        millis_remaining: code.millis_remaining(now_millis),
        code: code.value,
        generated_at_millis: code.generated_at_millis,
        window_millis: code.window_millis,
    };

    Json(ApiResponse::success(data, "Current session code"))
}

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    /// ISO 8601 date-only filter, e.g. "2026-03-09".
    pub date: Option<NaiveDate>,
    pub person_id: Option<i64>,
}

/// GET /attendance/entries?date=&person_id=
///
/// The attendance ledger as a flat list, optionally narrowed by day
/// and person. Students always get their own rows regardless of the
/// `person_id` parameter; faculty may filter freely.
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<EntriesQuery>,
) -> impl IntoResponse {
    let person_id = match claims.category {
        Category::Student => Some(claims.sub),
        Category::Faculty => query.person_id,
    };

    match AttendanceEntry::list(state.db(), query.date, person_id).await {
        Ok(entries) => {
            let data: Vec<AttendanceEntryResponse> =
                entries.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Attendance entries fetched")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to fetch attendance entries: {e}"
            ))),
        ),
    }
}
