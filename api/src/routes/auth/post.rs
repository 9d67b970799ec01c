use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::person::{Category, Model as Person};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::state::AppState;

lazy_static::lazy_static! {
    static ref ROLL_NUMBER_REGEX: regex::Regex =
        regex::Regex::new(r"(?i)^\d{2}[A-Z]{2,4}\d{3}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub display_name: String,

    #[validate(regex(
        path = *ROLL_NUMBER_REGEX,
        message = "Roll number must look like 21CSE001"
    ))]
    pub roll_number: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year: i32,

    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,

    pub department: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFacultyRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub display_name: String,

    #[validate(length(min = 1, message = "Faculty ID is required"))]
    pub faculty_id: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub category: Category,
    pub natural_key: String,
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthResponse {
    pub id: i64,
    pub display_name: String,
    pub natural_key: String,
    pub category: String,
    pub email: String,
    pub token: String,
    pub expires_at: String,
}

impl AuthResponse {
    fn for_person(person: &Person) -> Self {
        let (token, expires_at) = generate_jwt(person);
        Self {
            id: person.id,
            display_name: person.display_name.clone(),
            natural_key: person.natural_key.clone(),
            category: person.category.to_string(),
            email: person.email.clone(),
            token,
            expires_at,
        }
    }
}

/// Duplicate natural key / email checks shared by both registration paths.
async fn conflict_message(
    db: &sea_orm::DatabaseConnection,
    natural_key: &str,
    email: &str,
) -> Result<Option<&'static str>, sea_orm::DbErr> {
    if Person::find_by_natural_key(db, natural_key).await?.is_some() {
        return Ok(Some("A person with this ID is already registered"));
    }
    if Person::find_by_email(db, email).await?.is_some() {
        return Ok(Some("A person with this email is already registered"));
    }
    Ok(None)
}

/// POST /auth/register/student
///
/// Registers a student by roll number. Responds `201 Created` with a JWT,
/// `400` on validation failure, `409` on a duplicate roll number or email.
pub async fn register_student(
    State(state): State<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }
    if req.password != req.confirm_password {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Passwords do not match")),
        );
    }

    let db = state.db();
    match conflict_message(db, &req.roll_number, &req.email).await {
        Ok(Some(msg)) => return (StatusCode::CONFLICT, Json(ApiResponse::error(msg))),
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    }

    match Person::create(
        db,
        &req.display_name,
        &req.roll_number,
        &req.email,
        &req.password,
        Category::Student,
        Some(req.year),
        Some(req.course.as_str()),
        req.department.as_deref(),
    )
    .await
    {
        Ok(person) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AuthResponse::for_person(&person),
                "Student registered successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

/// POST /auth/register/faculty
pub async fn register_faculty(
    State(state): State<AppState>,
    Json(req): Json<RegisterFacultyRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }
    if req.password != req.confirm_password {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Passwords do not match")),
        );
    }

    let db = state.db();
    match conflict_message(db, &req.faculty_id, &req.email).await {
        Ok(Some(msg)) => return (StatusCode::CONFLICT, Json(ApiResponse::error(msg))),
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    }

    match Person::create(
        db,
        &req.display_name,
        &req.faculty_id,
        &req.email,
        &req.password,
        Category::Faculty,
        None,
        None,
        Some(req.department.as_str()),
    )
    .await
    {
        Ok(person) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AuthResponse::for_person(&person),
                "Faculty registered successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

/// POST /auth/login
///
/// Verifies `(category, natural_key, password)` and issues a JWT. The
/// response does not distinguish an unknown key from a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match Person::verify_credentials(state.db(), req.category, &req.natural_key, &req.password)
        .await
    {
        Ok(Some(person)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AuthResponse::for_person(&person),
                "Login successful",
            )),
        ),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}
