use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::response::ApiResponse;
use crate::state::AppState;
use db::models::person::{Category, Model as Person};

#[derive(Debug, Deserialize)]
pub struct PeopleQuery {
    /// "student" or "faculty"; omitted lists everyone.
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct PersonResponse {
    pub id: i64,
    pub display_name: String,
    pub natural_key: String,
    pub category: String,
    pub email: String,
    pub year: Option<i32>,
    pub course: Option<String>,
    pub department: Option<String>,
    pub created_at: String,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name,
            natural_key: p.natural_key,
            category: p.category.to_string(),
            email: p.email,
            year: p.year,
            course: p.course,
            department: p.department,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// GET /people?category=
///
/// The identity directory as a flat list. Faculty only.
pub async fn list_people(
    State(state): State<AppState>,
    Query(query): Query<PeopleQuery>,
) -> impl IntoResponse {
    let category = match query.category.as_deref() {
        None => None,
        Some(raw) => match Category::from_str(raw) {
            Ok(cat) => Some(cat),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Vec<PersonResponse>>::error(
                        "category must be 'student' or 'faculty'",
                    )),
                );
            }
        },
    };

    match Person::list(state.db(), category).await {
        Ok(people) => {
            let data: Vec<PersonResponse> = people.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "People fetched")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to fetch people: {e}"))),
        ),
    }
}
