//! Code Execution API Tests

use std::time::{Duration, Instant};

use axum::http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{demo_settings, live_settings, test_server, FakeJudge};

#[tokio::test]
async fn test_run_without_credential_returns_mock() {
    let server = test_server(demo_settings());

    for code in ["print('hi')", "", "while True: pass"] {
        let response = server.post("/run").json(&json!({ "code": code })).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({
                "output": "Hello, World!\n[Mock response - set up Judge0 API key]",
                "status": "success"
            })
        );
    }
}

#[tokio::test]
async fn test_run_with_placeholder_credential_returns_mock() {
    let mut settings = demo_settings();
    settings.judge.api_key = Some("your_rapidapi_key_here".into());
    let server = test_server(settings);

    let json: Value = server.post("/run").json(&json!({ "code": "x" })).await.json();
    assert_eq!(json["status"], "success");
}

#[tokio::test]
async fn test_run_returns_stdout() {
    let judge = FakeJudge::returning(FakeJudge::record(json!("1\n"), json!("warning"), "Accepted"));
    let submissions = judge.submissions.clone();
    let authorized = judge.authorized.clone();
    let server = test_server(live_settings(&judge.spawn().await, 10));

    let response = server
        .post("/run")
        .json(&json!({ "code": "print(1)", "language_id": 71 }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "output": "1\n", "status": "Accepted" })
    );

    let submissions = submissions.lock().unwrap();
    assert_eq!(
        submissions[0],
        json!({ "source_code": "print(1)", "language_id": 71, "stdin": "" })
    );
    assert!(*authorized.lock().unwrap());
}

#[tokio::test]
async fn test_run_falls_back_to_stderr() {
    let judge = FakeJudge::returning(FakeJudge::record(
        json!(null),
        json!("NameError: name 'x' is not defined\n"),
        "Runtime Error (NZEC)",
    ));
    let server = test_server(live_settings(&judge.spawn().await, 10));

    let json: Value = server.post("/run").json(&json!({ "code": "x" })).await.json();
    assert_eq!(json["output"], "NameError: name 'x' is not defined\n");
    assert_eq!(json["status"], "Runtime Error (NZEC)");
}

#[tokio::test]
async fn test_run_without_any_output() {
    let judge = FakeJudge::returning(FakeJudge::record(json!(""), json!(null), "Accepted"));
    let server = test_server(live_settings(&judge.spawn().await, 10));

    let json: Value = server.post("/run").json(&json!({ "code": "pass" })).await.json();
    assert_eq!(json["output"], "No output");
}

#[tokio::test]
async fn test_run_defaults_language_and_passes_missing_code() {
    let record = FakeJudge::record(json!(null), json!(null), "Compilation Error");
    let judge = FakeJudge::returning(record);
    let submissions = judge.submissions.clone();
    let server = test_server(live_settings(&judge.spawn().await, 10));

    server.post("/run").json(&json!({})).await.assert_status_ok();

    let submissions = submissions.lock().unwrap();
    assert_eq!(submissions[0], json!({ "language_id": 71, "stdin": "" }));
}

#[tokio::test]
async fn test_submission_failure_returns_500() {
    let mut judge = FakeJudge::returning(FakeJudge::record(json!("x"), json!(null), "Accepted"));
    judge.submit_status = StatusCode::UNAUTHORIZED;
    let server = test_server(live_settings(&judge.spawn().await, 10));

    let response = server.post("/run").json(&json!({ "code": "x" })).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Failed to execute code" }));
}

#[tokio::test]
async fn test_result_failure_returns_500() {
    let mut judge = FakeJudge::returning(FakeJudge::record(json!("x"), json!(null), "Accepted"));
    judge.fetch_status = StatusCode::SERVICE_UNAVAILABLE;
    let server = test_server(live_settings(&judge.spawn().await, 10));

    let response = server.post("/run").json(&json!({ "code": "x" })).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to get execution result" })
    );
}

#[tokio::test]
async fn test_unreachable_judge_returns_submission_error() {
    // Port 9 (discard) is not listening on the loopback interface
    let server = test_server(live_settings("http://127.0.0.1:9", 10));

    let response = server.post("/run").json(&json!({ "code": "x" })).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Failed to execute code");
}

#[tokio::test]
async fn test_result_is_fetched_after_delay() {
    let judge = FakeJudge::returning(FakeJudge::record(json!("ok"), json!(null), "Accepted"));
    let server = test_server(live_settings(&judge.spawn().await, 300));

    let started = Instant::now();
    server.post("/run").json(&json!({ "code": "x" })).await.assert_status_ok();
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_non_json_body_gets_mock_in_demo_mode() {
    let server = test_server(demo_settings());

    let response = server.post("/run").text(r#"{"code":"print(1)"}"#).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "success");

    let response = server.post("/run").json(&json!({ "code": 123 })).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "success");
}

#[tokio::test]
async fn test_non_json_body_is_submitted_without_code() {
    let record = FakeJudge::record(json!(null), json!(null), "Compilation Error");
    let judge = FakeJudge::returning(record);
    let submissions = judge.submissions.clone();
    let server = test_server(live_settings(&judge.spawn().await, 10));

    server.post("/run").text("print(1)").await.assert_status_ok();

    let submissions = submissions.lock().unwrap();
    assert_eq!(submissions[0], json!({ "language_id": 71, "stdin": "" }));
}

#[tokio::test]
async fn test_values_are_forwarded_without_coercion() {
    let record = FakeJudge::record(json!(null), json!("bad"), "Internal Error");
    let judge = FakeJudge::returning(record);
    let submissions = judge.submissions.clone();
    let server = test_server(live_settings(&judge.spawn().await, 10));

    server
        .post("/run")
        .json(&json!({ "code": 123, "language_id": null }))
        .await
        .assert_status_ok();

    let submissions = submissions.lock().unwrap();
    assert_eq!(
        submissions[0],
        json!({ "source_code": 123, "language_id": null, "stdin": "" })
    );
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let server = test_server(demo_settings());

    let response = server
        .post("/run")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_run_preflight_allows_cross_origin_post() {
    let server = test_server(demo_settings());

    let response = server
        .method(Method::OPTIONS, "/run")
        .add_header(header::ORIGIN, "http://classroom.example")
        .add_header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .await;
    response.assert_status_ok();
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_METHODS), "GET,POST");
}
