//! Judge Service Client
//!
//! Contract and HTTP implementation for the external code-execution service
//! (Judge0 behind RapidAPI).

mod client;
mod judge0;

pub use client::*;
pub use judge0::Judge0Client;
