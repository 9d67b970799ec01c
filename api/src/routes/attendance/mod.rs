use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::auth::guards::{allow_authenticated, allow_faculty};
use crate::state::AppState;

mod common;
mod get;
mod post;

pub use common::{AttendanceEntryResponse, PersonSummary, ScanResponse};
pub use get::{get_current_code, list_entries};
pub use post::scan;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/code",
            get(get_current_code).route_layer(from_fn(allow_faculty)),
        )
        .route(
            "/entries",
            get(list_entries).route_layer(from_fn(allow_authenticated)),
        )
        .route("/scan", post(scan).route_layer(from_fn(allow_authenticated)))
}
