use crate::state::AppState;
use axum::{Router, routing::get};

mod get;

pub use get::list_people;

pub fn people_routes() -> Router<AppState> {
    Router::new().route("/", get(list_people))
}
