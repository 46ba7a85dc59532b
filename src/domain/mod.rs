//! # Domain Layer
//!
//! Core types of the relay, independent of HTTP, WebSocket, or the judge API.
//!
//! ## Structure
//!
//! - **entities**: execution request/result, session participant
//! - **value_objects**: session and connection identifiers

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
