//! Rotating session codes: the payload a real QR image would carry.
//!
//! Wire format: `ATTENDANCE_QR_<windowIndex>_<epochMillis>`, both numeric
//! segments base-10. A code is fresh while the presenting clock is within
//! one validity window of the code's own generation timestamp, so
//! validation needs no server-side state.

use thiserror::Error;

pub const CODE_PREFIX: &str = "ATTENDANCE_QR";
pub const DELIMITER: char = '_';
pub const DEFAULT_WINDOW_MILLIS: i64 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Wrong prefix, too few segments, or a non-numeric segment.
    #[error("malformed session code")]
    Malformed,
    /// Parsed fine but generated outside the freshness window.
    #[error("session code expired")]
    Expired,
}

/// An ephemeral display code. Never persisted; superseded by the next
/// rotation and simply goes stale once its timestamp falls out of window.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionCode {
    pub value: String,
    pub generated_at_millis: i64,
    pub window_millis: i64,
}

impl SessionCode {
    pub fn generate(now_millis: i64, window_millis: i64) -> Self {
        let window_index = now_millis.div_euclid(window_millis.max(1));
        let value = format!("{CODE_PREFIX}{DELIMITER}{window_index}{DELIMITER}{now_millis}");
        Self {
            value,
            generated_at_millis: now_millis,
            window_millis,
        }
    }

    /// Milliseconds until this code falls out of its freshness window.
    pub fn millis_remaining(&self, now_millis: i64) -> i64 {
        (self.generated_at_millis + self.window_millis - now_millis).max(0)
    }
}

/// Splits a code into its (window index, generated-at) segments without
/// judging freshness.
pub fn parse(code: &str) -> Result<(i64, i64), CodeError> {
    // The prefix itself contains the delimiter, so check it literally
    // before counting segments.
    if !code.starts_with(CODE_PREFIX) {
        return Err(CodeError::Malformed);
    }
    let segments: Vec<&str> = code.split(DELIMITER).collect();
    if segments.len() < 4 {
        return Err(CodeError::Malformed);
    }
    let window_index: i64 = segments[2].parse().map_err(|_| CodeError::Malformed)?;
    let generated_at: i64 = segments[3].parse().map_err(|_| CodeError::Malformed)?;
    Ok((window_index, generated_at))
}

/// Full freshness check: parse, then require
/// `|now - generated_at| <= window`. Returns the generation timestamp on
/// success so callers can log code age.
pub fn validate(code: &str, now_millis: i64, window_millis: i64) -> Result<i64, CodeError> {
    let (_, generated_at) = parse(code)?;
    if (now_millis - generated_at).abs() <= window_millis {
        Ok(generated_at)
    } else {
        Err(CodeError::Expired)
    }
}
