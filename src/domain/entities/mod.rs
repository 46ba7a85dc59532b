//! # Domain Entities
//!
//! - **ExecutionRequest / ExecutionResult**: one round trip through the judge service
//! - **Participant**: a connection tagged with who joined a session

mod execution;
mod participant;

pub use execution::{ExecutionRequest, ExecutionResult, DEMO_OUTPUT, DEMO_STATUS, NO_OUTPUT};
pub use participant::Participant;
