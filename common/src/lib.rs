pub mod config;
pub mod logger;

use validator::ValidationErrors;

/// Flattens `validator` field errors into a single user-facing message,
/// e.g. "Roll number is required; Password must be at least 6 characters".
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
