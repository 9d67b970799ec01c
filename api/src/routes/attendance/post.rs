use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use common::config::Config;
use serde::Deserialize;

use super::common::ScanResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::scan::{self, ScanError};
use crate::state::AppState;
use db::models::attendance_entry::{ScanAction, ScanOutcome, ScanRejection};
use db::models::person::{Category, normalize_natural_key};
use db::session_code::CodeError;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// The decoded QR payload.
    pub code: String,
    /// Whose attendance to record. Students may omit this (their own key
    /// comes from the token); faculty operating a shared scanner must
    /// provide it.
    pub natural_key: Option<String>,
}

/// POST /attendance/scan
///
/// Validates code freshness, then runs the session matcher. Responses:
/// - `200 OK` — check-in or check-out recorded.
/// - `400 Bad Request` — malformed or expired code, or missing key.
/// - `403 Forbidden` — student scanning for someone else.
/// - `404 Not Found` — no person matches the scanned identifier.
/// - `409 Conflict` — both times already recorded for today.
pub async fn scan(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<ScanRequest>,
) -> (StatusCode, Json<ApiResponse<ScanResponse>>) {
    let natural_key = match (claims.category, body.natural_key.as_deref()) {
        (Category::Faculty, Some(key)) => key.to_owned(),
        (Category::Faculty, None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "natural_key is required when scanning on behalf of a student",
                )),
            );
        }
        (Category::Student, Some(key))
            if normalize_natural_key(key) != claims.natural_key =>
        {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error(
                    "Students may only record their own attendance",
                )),
            );
        }
        (Category::Student, _) => claims.natural_key.clone(),
    };

    let window_millis = Config::get().code_window_millis;
    match scan::submit(state.db(), &body.code, &natural_key, Utc::now(), window_millis).await {
        Ok(ScanOutcome::Accepted {
            action,
            person,
            entry,
        }) => {
            let message = match action {
                ScanAction::CheckIn => "Checked in",
                ScanAction::CheckOut => "Checked out",
            };
            let data = ScanResponse {
                action: match action {
                    ScanAction::CheckIn => "check_in".into(),
                    ScanAction::CheckOut => "check_out".into(),
                },
                person: person.into(),
                entry: entry.into(),
            };
            (StatusCode::OK, Json(ApiResponse::success(data, message)))
        }
        Ok(ScanOutcome::Rejected(ScanRejection::UnknownIdentity)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No person matches the scanned identifier")),
        ),
        Ok(ScanOutcome::Rejected(ScanRejection::AlreadyCompleted)) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Attendance already completed for today")),
        ),
        Err(ScanError::Code(CodeError::Malformed)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Malformed session code")),
        ),
        Err(ScanError::Code(CodeError::Expired)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Session code expired")),
        ),
        Err(ScanError::Db(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to record scan: {e}"))),
        ),
    }
}
