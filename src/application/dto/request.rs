//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ExecutionRequest;
use crate::shared::json::present;

/// `POST /run` body. Nothing is validated: both fields are forwarded to the
/// judge as sent, and only a missing `language_id` is replaced by the default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunCodeRequest {
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub language_id: Option<Value>,
}

impl RunCodeRequest {
    /// Read a parsed JSON body. Anything other than an object carries no fields.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn into_execution(self, default_language_id: i64) -> ExecutionRequest {
        let language_id = self
            .language_id
            .unwrap_or_else(|| Value::from(default_language_id));
        ExecutionRequest::new(self.code, language_id)
    }
}
