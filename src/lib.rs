//! # Classroom Relay Library
//!
//! This crate provides the backend of a live coding classroom:
//! - `POST /run` relays code to a Judge0 judge service and returns its output
//! - `GET /ws` is a WebSocket relay that rebroadcasts editor, quiz, and join
//!   events to the other members of a session
//!
//! ## Module Structure
//!
//! ```text
//! classroom_relay/
//! +-- config/         Configuration management
//! +-- domain/         Execution and participant types, identifiers
//! +-- application/    Execution service and DTOs
//! +-- infrastructure/ Judge client and metrics
//! +-- presentation/   HTTP routes and WebSocket gateway
//! +-- shared/         Errors and timestamp helpers
//! ```

// Configuration module
pub mod config;

// Domain layer
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
