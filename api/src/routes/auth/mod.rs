use crate::state::AppState;
use axum::{Router, routing::post};

mod post;

pub use post::{login, register_faculty, register_student};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/student", post(register_student))
        .route("/register/faculty", post(register_faculty))
        .route("/login", post(login))
}
