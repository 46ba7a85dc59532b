//! Serde helpers for client-supplied values that are forwarded untouched.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keep a present field as `Some`, including an explicit `null`.
///
/// Use together with `#[serde(default)]` so that only a missing field
/// becomes `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
