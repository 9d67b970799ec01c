//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness check (public)
//! - `/auth` → registration and login (public)
//! - `/attendance` → rotating code, scan submission, ledger queries
//! - `/people` → identity directory (faculty only)

use axum::{Router, middleware::from_fn};

use crate::auth::guards::allow_faculty;
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, health::health_routes,
    people::people_routes,
};
use crate::state::AppState;

pub mod attendance;
pub mod auth;
pub mod health;
pub mod people;

/// Builds the complete application router. Role guards are applied
/// per-route inside each group, so the returned router is ready to mount
/// under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/attendance", attendance_routes())
        .nest("/people", people_routes().route_layer(from_fn(allow_faculty)))
        .with_state(app_state)
}
