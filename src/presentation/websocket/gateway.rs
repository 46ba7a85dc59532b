//! WebSocket Gateway
//!
//! Registry of live connections and the sessions (rooms) they joined.
//! Broadcasts are one-way pushes onto each recipient's outbound channel.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::mpsc;

use super::messages::ServerEvent;
use crate::domain::{ConnectionId, Participant, SessionId};

/// Sending half of a connection's outbound queue.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Connected client with message sender
pub struct Connection {
    pub connected_at: DateTime<Utc>,
    sender: EventSender,
    /// Sessions joined by this connection, with the tags given at join time.
    sessions: RwLock<HashMap<SessionId, Participant>>,
}

impl Connection {
    fn send(&self, event: ServerEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Sessions this connection has joined
    pub fn joined_sessions(&self) -> Vec<SessionId> {
        self.sessions.read().keys().cloned().collect()
    }
}

/// WebSocket gateway managing all connections
#[derive(Default)]
pub struct Gateway {
    /// Active connections by id
    connections: DashMap<ConnectionId, Arc<Connection>>,
    /// Session id to member connection ids
    rooms: DashMap<SessionId, HashSet<ConnectionId>>,
}

impl Gateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection
    pub fn register_connection(&self, id: ConnectionId, sender: EventSender) {
        let connection = Arc::new(Connection {
            connected_at: Utc::now(),
            sender,
            sessions: RwLock::new(HashMap::new()),
        });
        self.connections.insert(id, connection);

        tracing::debug!(connection_id = %id, "Connection registered");
    }

    /// Unregister a connection, leaving every session it joined.
    /// Returns the number of sessions it was removed from.
    pub fn unregister_connection(&self, id: ConnectionId) -> usize {
        let Some((_, connection)) = self.connections.remove(&id) else {
            return 0;
        };

        let sessions = connection.joined_sessions();
        for session_id in &sessions {
            self.leave_room(session_id, id);
        }

        tracing::debug!(
            connection_id = %id,
            sessions = sessions.len(),
            connected_secs = (Utc::now() - connection.connected_at).num_seconds(),
            "Connection unregistered"
        );
        sessions.len()
    }

    /// Add a participant's connection to its session.
    ///
    /// Joining the same session twice keeps a single membership but re-tags
    /// the participant. Returns `false` if the connection is not registered.
    pub fn join(&self, participant: Participant) -> bool {
        let Some(connection) = self.connection(participant.connection_id) else {
            tracing::warn!(
                connection_id = %participant.connection_id,
                session_id = %participant.session_id,
                "Join from unknown connection ignored"
            );
            return false;
        };

        self.rooms
            .entry(participant.session_id.clone())
            .or_default()
            .insert(participant.connection_id);

        connection
            .sessions
            .write()
            .insert(participant.session_id.clone(), participant);

        true
    }

    /// Send an event to every member of a session except `from`.
    ///
    /// The sender does not need to be a member. Returns the number of
    /// connections the event was queued for.
    pub fn broadcast_from(
        &self,
        from: ConnectionId,
        session_id: &SessionId,
        event: &ServerEvent,
    ) -> usize {
        let targets: Vec<ConnectionId> = match self.rooms.get(session_id) {
            Some(members) => members.iter().filter(|id| **id != from).copied().collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for target in targets {
            match self.connection(target) {
                Some(connection) if connection.send(event.clone()) => delivered += 1,
                _ => {
                    tracing::warn!(
                        connection_id = %target,
                        session_id = %session_id,
                        "Skipped closed connection during broadcast"
                    );
                }
            }
        }
        delivered
    }

    /// Get a connection by id
    pub fn connection(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(&id).map(|c| c.value().clone())
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of sessions with at least one member
    pub fn session_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of members in a session
    pub fn member_count(&self, session_id: &SessionId) -> usize {
        self.rooms.get(session_id).map_or(0, |members| members.len())
    }

    /// Participants of a session as tagged at join time
    #[cfg(test)]
    fn participants(&self, session_id: &SessionId) -> Vec<Participant> {
        let ids: Vec<ConnectionId> = match self.rooms.get(session_id) {
            Some(members) => members.iter().copied().collect(),
            None => return Vec::new(),
        };

        ids.into_iter()
            .filter_map(|id| self.connection(id))
            .filter_map(|c| c.sessions.read().get(session_id).cloned())
            .collect()
    }

    fn leave_room(&self, session_id: &SessionId, id: ConnectionId) {
        if let Some(mut members) = self.rooms.get_mut(session_id) {
            members.remove(&id);
        }
        self.rooms
            .remove_if(session_id, |_, members| members.is_empty());
    }
}
