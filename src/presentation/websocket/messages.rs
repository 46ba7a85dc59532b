//! WebSocket Message Types
//!
//! Every frame is a JSON text message `{"event": <name>, "data": <payload>}`.
//! Payload field names are camelCase and form the wire contract. Only
//! `sessionId` is required; every other field is relayed exactly as received.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Participant, SessionId};
use crate::shared::json::present;
use crate::shared::time::now_iso;

/// Inbound events sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinSession(JoinSessionPayload),
    EditorChange(EditorChangePayload),
    SendQuiz(SendQuizPayload),
}

impl ClientEvent {
    /// Session the event targets
    pub fn session_id(&self) -> &SessionId {
        match self {
            ClientEvent::JoinSession(p) => &p.session_id,
            ClientEvent::EditorChange(p) => &p.session_id,
            ClientEvent::SendQuiz(p) => &p.session_id,
        }
    }
}

/// `join_session` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionPayload {
    pub session_id: SessionId,
    #[serde(default, deserialize_with = "present")]
    pub user_type: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub user_name: Option<Value>,
}

/// `editor_change` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorChangePayload {
    pub session_id: SessionId,
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
}

/// `send_quiz` payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendQuizPayload {
    pub session_id: SessionId,
    #[serde(default, deserialize_with = "present")]
    pub quiz_text: Option<Value>,
}

/// Outbound events broadcast to the other members of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    UserJoined(UserJoinedPayload),
    EditorUpdate(EditorUpdatePayload),
    QuizReceived(QuizReceivedPayload),
}

impl ServerEvent {
    /// Get the event name (as sent on the wire)
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerEvent::UserJoined(_) => "user_joined",
            ServerEvent::EditorUpdate(_) => "editor_update",
            ServerEvent::QuizReceived(_) => "quiz_received",
        }
    }

    pub fn user_joined(participant: &Participant) -> Self {
        ServerEvent::UserJoined(UserJoinedPayload {
            user_name: participant.user_name.clone(),
            user_type: participant.user_type.clone(),
            message: participant.greeting(),
        })
    }

    pub fn editor_update(code: Option<Value>) -> Self {
        ServerEvent::EditorUpdate(EditorUpdatePayload {
            code,
            updated_at: now_iso(),
        })
    }

    pub fn quiz_received(quiz_text: Option<Value>) -> Self {
        ServerEvent::QuizReceived(QuizReceivedPayload {
            quiz_text,
            sent_at: now_iso(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJoinedPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<Value>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReceivedPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_text: Option<Value>,
    pub sent_at: String,
}
