mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use db::session_code::SessionCode;
use helpers::{
    get_request, json_request, make_test_app, register_faculty, register_student, response_json,
};
use serde_json::json;
use tower::ServiceExt;

fn fresh_code() -> String {
    SessionCode::generate(Utc::now().timestamp_millis(), 15_000).value
}

#[tokio::test]
async fn scan_cycle_check_in_check_out_then_conflict() {
    let app = make_test_app().await;
    let (token, _) = register_student(&app, "21CSE001").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&token),
            &json!({ "code": fresh_code() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["action"], "check_in");
    assert_eq!(body["data"]["entry"]["status"], "present");
    assert!(body["data"]["entry"]["check_in_time"].is_string());
    assert!(body["data"]["entry"]["check_out_time"].is_null());

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&token),
            &json!({ "code": fresh_code() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["action"], "check_out");
    assert!(body["data"]["entry"]["check_out_time"].is_string());

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&token),
            &json!({ "code": fresh_code() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn scan_rejects_malformed_and_expired_codes() {
    let app = make_test_app().await;
    let (token, _) = register_student(&app, "21CSE002").await;

    for bad in ["GARBAGE", "ATTENDANCE_QR_abc_123"] {
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance/scan",
                Some(&token),
                &json!({ "code": bad }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "code: {bad}");
        let body = response_json(response).await;
        assert_eq!(body["message"], "Malformed session code");
    }

    let stale = SessionCode::generate(Utc::now().timestamp_millis() - 60_000, 15_000).value;
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&token),
            &json!({ "code": stale }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Session code expired");
}

#[tokio::test]
async fn scan_requires_authentication() {
    let app = make_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            None,
            &json!({ "code": fresh_code() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn student_cannot_scan_for_someone_else() {
    let app = make_test_app().await;
    let (token, _) = register_student(&app, "21CSE003").await;
    register_student(&app, "21CSE004").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&token),
            &json!({ "code": fresh_code(), "natural_key": "21CSE004" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn faculty_scanner_records_on_behalf_of_a_student() {
    let app = make_test_app().await;
    let (_, roll) = register_student(&app, "21CSE005").await;
    let faculty_token = register_faculty(&app, "FAC200").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&faculty_token),
            &json!({ "code": fresh_code(), "natural_key": roll }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["action"], "check_in");
    assert_eq!(body["data"]["person"]["natural_key"], "21CSE005");

    // Without a target key there is nobody to record.
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&faculty_token),
            &json!({ "code": fresh_code() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scan_with_unknown_natural_key_is_not_found() {
    let app = make_test_app().await;
    let faculty_token = register_faculty(&app, "FAC201").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&faculty_token),
            &json!({ "code": fresh_code(), "natural_key": "99ZZZ999" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn current_code_is_faculty_only_and_fresh() {
    let app = make_test_app().await;
    let (student_token, _) = register_student(&app, "21CSE006").await;
    let faculty_token = register_faculty(&app, "FAC202").await;

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/attendance/code", Some(&student_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/attendance/code", Some(&faculty_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let code = body["data"]["code"].as_str().unwrap();
    assert!(code.starts_with("ATTENDANCE_QR_"));
    assert!(body["data"]["millis_remaining"].as_i64().unwrap() >= 0);

    // The displayed code must pass its own validator right now.
    assert!(
        db::session_code::validate(code, Utc::now().timestamp_millis(), 15_000).is_ok()
    );
}

#[tokio::test]
async fn ledger_query_lists_entries_for_faculty() {
    let app = make_test_app().await;
    let (student_token, _) = register_student(&app, "21CSE007").await;
    let faculty_token = register_faculty(&app, "FAC203").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance/scan",
            Some(&student_token),
            &json!({ "code": fresh_code() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let today = Utc::now().date_naive();
    let uri = format!("/api/attendance/entries?date={today}");
    let response = app
        .router
        .clone()
        .oneshot(get_request(&uri, Some(&faculty_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "present");

}

#[tokio::test]
async fn students_read_only_their_own_ledger_rows() {
    let app = make_test_app().await;
    let (token_a, _) = register_student(&app, "21CSE008").await;
    let (token_b, _) = register_student(&app, "21CSE009").await;

    for token in [&token_a, &token_b] {
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance/scan",
                Some(token),
                &json!({ "code": fresh_code() }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/attendance/entries", Some(&token_a)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    let own_person_id = entries[0]["person_id"].as_i64().unwrap();

    // A student asking for someone else's rows still gets their own.
    let response = app
        .router
        .clone()
        .oneshot(get_request(
            &format!("/api/attendance/entries?person_id={}", own_person_id + 1),
            Some(&token_a),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["person_id"].as_i64().unwrap(), own_person_id);

    // The other student sees one row too, and it is a different person's.
    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/attendance/entries", Some(&token_b)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_ne!(entries[0]["person_id"].as_i64().unwrap(), own_person_id);
}
