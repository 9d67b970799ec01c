use api::routes::routes;
use api::services::rotator::CodeRotator;
use api::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// A fully wired app over a fresh in-memory database. The rotator is held
/// here so its watch channel stays alive for the duration of a test.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    _rotator: CodeRotator,
}

pub async fn make_test_app() -> TestApp {
    let db = db::test_utils::setup_test_db().await;
    let rotator = CodeRotator::spawn(common::config::Config::get().code_window_millis);
    let state = AppState::new(db.clone(), rotator.subscribe());
    let router = Router::new().nest("/api", routes(state));

    TestApp {
        router,
        db,
        _rotator: rotator,
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Registers a student through the API and returns (token, natural_key).
pub async fn register_student(app: &TestApp, roll_number: &str) -> (String, String) {
    use tower::ServiceExt;

    let body = serde_json::json!({
        "display_name": "Test Student",
        "roll_number": roll_number,
        "email": format!("{}@test.com", roll_number.to_lowercase()),
        "password": "secret-pass",
        "confirm_password": "secret-pass",
        "year": 3,
        "course": "B.Tech CSE",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/register/student", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let json = response_json(response).await;
    (
        json["data"]["token"].as_str().unwrap().to_owned(),
        json["data"]["natural_key"].as_str().unwrap().to_owned(),
    )
}

/// Registers a faculty member through the API and returns their token.
pub async fn register_faculty(app: &TestApp, faculty_id: &str) -> String {
    use tower::ServiceExt;

    let body = serde_json::json!({
        "display_name": "Test Faculty",
        "faculty_id": faculty_id,
        "email": format!("{}@test.com", faculty_id.to_lowercase()),
        "password": "secret-pass",
        "confirm_password": "secret-pass",
        "department": "Computer Science",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/register/faculty", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let json = response_json(response).await;
    json["data"]["token"].as_str().unwrap().to_owned()
}
