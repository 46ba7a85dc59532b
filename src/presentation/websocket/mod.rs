//! WebSocket Gateway
//!
//! Real-time session relay over WebSocket connections.

pub mod gateway;
pub mod handler;
pub mod messages;

pub use gateway::{Connection, EventSender, Gateway};
pub use handler::{handle_event, ws_handler};
pub use messages::{ClientEvent, ServerEvent};
