//! Scan pipeline: freshness-check the presented code, then hand the
//! natural key to the session matcher. Shared by the HTTP scan endpoint
//! and any `CodeSource`-driven consumer.

use chrono::{DateTime, Utc};
use db::models::attendance_entry::{Model as AttendanceEntry, ScanOutcome};
use db::session_code::{self, CodeError};
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

use super::scanner::CodeSource;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Code(#[from] CodeError),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Validates the code against `now`, then records the scan for
/// `natural_key`. A stale or malformed code never reaches the ledger.
pub async fn submit(
    db: &DatabaseConnection,
    code: &str,
    natural_key: &str,
    now: DateTime<Utc>,
    window_millis: i64,
) -> Result<ScanOutcome, ScanError> {
    session_code::validate(code, now.timestamp_millis(), window_millis)?;
    Ok(AttendanceEntry::record_scan(db, natural_key, now).await?)
}

/// Drains a `CodeSource` on behalf of one person, submitting every decoded
/// string it produces. Returns when the source ends. This is the seam
/// where a real QR decoder would plug in.
pub async fn run_code_source<S: CodeSource>(
    mut source: S,
    db: &DatabaseConnection,
    natural_key: &str,
    window_millis: i64,
) -> Vec<Result<ScanOutcome, ScanError>> {
    let mut outcomes = Vec::new();
    while let Some(code) = source.next_code().await {
        let result = submit(db, &code, natural_key, Utc::now(), window_millis).await;
        match &result {
            Ok(outcome) => tracing::debug!(?outcome, "scan processed"),
            Err(err) => tracing::debug!(%err, "scan rejected"),
        }
        outcomes.push(result);
    }
    outcomes
}
