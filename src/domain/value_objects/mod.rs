//! # Domain Value Objects
//!
//! - **SessionId**: caller-supplied room key
//! - **ConnectionId**: UUID assigned to each WebSocket connection

mod ids;

pub use ids::*;
