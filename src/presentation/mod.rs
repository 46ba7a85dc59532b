//! Presentation Layer
//!
//! HTTP routes and the WebSocket session relay.

pub mod http;
pub mod websocket;
pub mod middleware;
