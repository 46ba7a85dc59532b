//! Data Transfer Objects

pub mod request;
pub mod response;

pub use request::RunCodeRequest;
pub use response::RunCodeResponse;
