//! HTTP Layer
//!
//! REST endpoints and route configuration.

pub mod handlers;
pub mod routes;
