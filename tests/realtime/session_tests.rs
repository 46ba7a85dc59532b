//! Session Relay Tests
//!
//! Spins up the server and drives it with real WebSocket clients.

use futures::SinkExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use crate::common::{
    assert_silent, demo_settings, emit, join, next_event, spawn_app, wait_for_connections,
    wait_for_members, ws_connect,
};

#[tokio::test]
async fn test_join_notifies_other_members_only() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_student, mut r_student) = ws_connect(addr).await;
    let (mut w_teacher, mut r_teacher) = ws_connect(addr).await;

    join(&mut w_student, "S", "student", "Bob").await;
    wait_for_members(&state, "S", 1).await;

    join(&mut w_teacher, "S", "teacher", "Alice").await;
    wait_for_members(&state, "S", 2).await;

    let event = next_event(&mut r_student).await;
    assert_eq!(
        event,
        json!({
            "event": "user_joined",
            "data": {
                "userName": "Alice",
                "userType": "teacher",
                "message": "Alice joined the session"
            }
        })
    );

    assert_silent(&mut r_teacher).await;
    let _ = w_student.close().await;
    let _ = w_teacher.close().await;
}

#[tokio::test]
async fn test_editor_change_stays_within_session() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_a, mut r_a) = ws_connect(addr).await;
    let (mut w_other, mut r_other) = ws_connect(addr).await;
    let (mut w_teacher, mut r_teacher) = ws_connect(addr).await;

    join(&mut w_a, "S", "student", "Bob").await;
    join(&mut w_other, "T", "student", "Carol").await;
    wait_for_members(&state, "S", 1).await;
    wait_for_members(&state, "T", 1).await;

    join(&mut w_teacher, "S", "teacher", "Alice").await;
    wait_for_members(&state, "S", 2).await;
    assert_eq!(next_event(&mut r_a).await["event"], "user_joined");

    let change = json!({ "sessionId": "S", "code": "print(1)" });
    emit(&mut w_teacher, "editor_change", change).await;

    let event = next_event(&mut r_a).await;
    assert_eq!(event["event"], "editor_update");
    assert_eq!(event["data"]["code"], "print(1)");
    assert!(event["data"]["updatedAt"].is_string());

    assert_silent(&mut r_other).await;
    assert_silent(&mut r_teacher).await;
}

#[tokio::test]
async fn test_sequential_editor_changes_arrive_in_order() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_student, mut r_student) = ws_connect(addr).await;
    let (mut w_teacher, _r_teacher) = ws_connect(addr).await;

    join(&mut w_student, "S", "student", "Bob").await;
    wait_for_members(&state, "S", 1).await;

    for code in ["a = 1", "a = 2", "a = 3"] {
        let change = json!({ "sessionId": "S", "code": code });
        emit(&mut w_teacher, "editor_change", change).await;
    }

    for expected in ["a = 1", "a = 2", "a = 3"] {
        let event = next_event(&mut r_student).await;
        assert_eq!(event["event"], "editor_update");
        assert_eq!(event["data"]["code"], expected);
    }
}

#[tokio::test]
async fn test_send_quiz_reaches_members() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_student, mut r_student) = ws_connect(addr).await;
    let (mut w_teacher, _r_teacher) = ws_connect(addr).await;

    join(&mut w_student, "S", "student", "Bob").await;
    wait_for_members(&state, "S", 1).await;

    let quiz = json!({ "sessionId": "S", "quizText": "What does len('abc') return?" });
    emit(&mut w_teacher, "send_quiz", quiz).await;

    let event = next_event(&mut r_student).await;
    assert_eq!(event["event"], "quiz_received");
    assert_eq!(event["data"]["quizText"], "What does len('abc') return?");
    assert!(event["data"]["sentAt"].is_string());
}

#[tokio::test]
async fn test_structured_payloads_are_relayed_unchanged() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_student, mut r_student) = ws_connect(addr).await;
    let (mut w_teacher, _r_teacher) = ws_connect(addr).await;

    join(&mut w_student, "S", "student", "Bob").await;
    wait_for_members(&state, "S", 1).await;

    let delta = json!({ "ops": [{ "retain": 4 }, { "insert": "x" }] });
    let change = json!({ "sessionId": "S", "code": delta.clone() });
    emit(&mut w_teacher, "editor_change", change).await;

    let quiz = json!({ "question": "2 + 2?", "choices": [3, 4, 5] });
    let message = json!({ "sessionId": "S", "quizText": quiz.clone() });
    emit(&mut w_teacher, "send_quiz", message).await;

    let event = next_event(&mut r_student).await;
    assert_eq!(event["event"], "editor_update");
    assert_eq!(event["data"]["code"], delta);

    let event = next_event(&mut r_student).await;
    assert_eq!(event["event"], "quiz_received");
    assert_eq!(event["data"]["quizText"], quiz);
}

#[tokio::test]
async fn test_disconnected_members_stop_receiving() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_a, mut r_a) = ws_connect(addr).await;
    let (mut w_b, _r_b) = ws_connect(addr).await;
    let (mut w_c, _r_c) = ws_connect(addr).await;
    let (mut w_sender, _r_sender) = ws_connect(addr).await;

    join(&mut w_a, "S", "student", "A").await;
    wait_for_members(&state, "S", 1).await;
    join(&mut w_b, "S", "student", "B").await;
    wait_for_members(&state, "S", 2).await;
    join(&mut w_c, "S", "student", "C").await;
    wait_for_members(&state, "S", 3).await;

    assert_eq!(next_event(&mut r_a).await["data"]["userName"], "B");
    assert_eq!(next_event(&mut r_a).await["data"]["userName"], "C");

    w_b.close().await.unwrap();
    w_c.close().await.unwrap();
    wait_for_members(&state, "S", 1).await;
    wait_for_connections(&state, 2).await;

    let change = json!({ "sessionId": "S", "code": "still here" });
    emit(&mut w_sender, "editor_change", change).await;

    let event = next_event(&mut r_a).await;
    assert_eq!(event["data"]["code"], "still here");
}

#[tokio::test]
async fn test_last_member_leaving_drops_session() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_a, _r_a) = ws_connect(addr).await;

    join(&mut w_a, "S", "teacher", "A").await;
    wait_for_members(&state, "S", 1).await;
    assert_eq!(state.gateway.session_count(), 1);

    w_a.close().await.unwrap();
    wait_for_connections(&state, 0).await;
    assert_eq!(state.gateway.session_count(), 0);
}

#[tokio::test]
async fn test_malformed_frames_keep_connection_open() {
    let (addr, state) = spawn_app(demo_settings()).await;
    let (mut w_a, mut r_a) = ws_connect(addr).await;
    let (mut w_b, _r_b) = ws_connect(addr).await;

    w_a.send(Message::Text("not json".to_string().into()))
        .await
        .unwrap();
    emit(&mut w_a, "unknown_event", json!({ "sessionId": "S" })).await;
    emit(&mut w_a, "editor_change", json!({ "code": "no session id" })).await;
    join(&mut w_a, "S", "student", "A").await;
    wait_for_members(&state, "S", 1).await;

    let quiz = json!({ "sessionId": "S", "quizText": "still alive?" });
    emit(&mut w_b, "send_quiz", quiz).await;
    assert_eq!(next_event(&mut r_a).await["data"]["quizText"], "still alive?");
}
