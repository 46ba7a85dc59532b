//! Session participant entity.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::value_objects::{ConnectionId, SessionId};

/// A live connection tagged at join time.
///
/// Participants are not persisted; a reconnect produces a new connection id
/// with no link to the old one. The tags are whatever the client sent and are
/// relayed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub session_id: SessionId,
    pub user_type: Option<Value>,
    pub user_name: Option<Value>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        connection_id: ConnectionId,
        session_id: SessionId,
        user_type: Option<Value>,
        user_name: Option<Value>,
    ) -> Self {
        Self {
            connection_id,
            session_id,
            user_type,
            user_name,
            joined_at: Utc::now(),
        }
    }

    /// Name shown to other members; clients may omit it.
    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.user_name {
            None | Some(Value::Null) => Cow::Borrowed("Anonymous"),
            Some(Value::String(name)) => Cow::Borrowed(name),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// Greeting broadcast to the rest of the session.
    pub fn greeting(&self) -> String {
        format!("{} joined the session", self.display_name())
    }
}
