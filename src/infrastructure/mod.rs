//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - The judge service HTTP client
//! - Prometheus metrics

pub mod judge;
pub mod metrics;
