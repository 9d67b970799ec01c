mod helpers;

use axum::http::StatusCode;
use helpers::{
    get_request, json_request, make_test_app, register_faculty, register_student, response_json,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn register_student_returns_token_and_normalized_key() {
    let app = make_test_app().await;

    let body = json!({
        "display_name": "Asha Iyer",
        "roll_number": "21cse001",
        "email": "asha@test.com",
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
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["natural_key"], "21CSE001");
    assert_eq!(json["data"]["category"], "student");
    assert!(!json["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn register_rejects_bad_roll_number_and_short_password() {
    let app = make_test_app().await;

    let bad_roll = json!({
        "display_name": "X",
        "roll_number": "not-a-roll",
        "email": "x@test.com",
        "password": "secret-pass",
        "confirm_password": "secret-pass",
        "year": 1,
        "course": "B.Tech IT",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/register/student", None, &bad_roll))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Roll number"));

    let short_password = json!({
        "display_name": "X",
        "roll_number": "21CSE002",
        "email": "x2@test.com",
        "password": "abc",
        "confirm_password": "abc",
        "year": 1,
        "course": "B.Tech IT",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register/student",
            None,
            &short_password,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_password_mismatch() {
    let app = make_test_app().await;

    let body = json!({
        "display_name": "X",
        "roll_number": "21CSE003",
        "email": "x3@test.com",
        "password": "secret-pass",
        "confirm_password": "different",
        "year": 2,
        "course": "B.Tech CSE",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/register/student", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["message"], "Passwords do not match");
}

#[tokio::test]
async fn duplicate_roll_number_conflicts_even_with_different_case() {
    let app = make_test_app().await;
    register_student(&app, "21CSE004").await;

    let body = json!({
        "display_name": "Imposter",
        "roll_number": "21cse004",
        "email": "other@test.com",
        "password": "secret-pass",
        "confirm_password": "secret-pass",
        "year": 2,
        "course": "B.Tech CSE",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/register/student", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials_only() {
    let app = make_test_app().await;
    register_student(&app, "21CSE005").await;

    let ok = json!({
        "category": "student",
        "natural_key": "21cse005",
        "password": "secret-pass",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", None, &ok))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert!(!json["data"]["token"].as_str().unwrap().is_empty());

    let wrong_password = json!({
        "category": "student",
        "natural_key": "21CSE005",
        "password": "nope",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", None, &wrong_password))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A student's roll number cannot log in through the faculty door.
    let wrong_category = json!({
        "category": "faculty",
        "natural_key": "21CSE005",
        "password": "secret-pass",
    });
    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/auth/login", None, &wrong_category))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn faculty_routes_reject_students_and_anonymous_callers() {
    let app = make_test_app().await;
    let (student_token, _) = register_student(&app, "21CSE006").await;
    let faculty_token = register_faculty(&app, "FAC100").await;

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/people", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/people", Some(&student_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/people?category=student", Some(&faculty_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let people = json["data"].as_array().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["natural_key"], "21CSE006");
}
