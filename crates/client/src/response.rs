//! Decoding of the registry API's status envelope.
//!
//! The registry answers every instance call with a JSON object such as
//! `{"statusCode": 201, "friendlyMessage": "..."}`. Some deployments wrap
//! that object in a JSON string (`"{\"statusCode\":201}"`), so a string body
//! is decoded a second time before inspection.

use serde::Deserialize;
use serde_json::Value;

/// `statusCode` value that marks a successful create or update.
pub const STATUS_CREATED: i64 = 201;

/// The status envelope returned by the registry API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub status_code: Option<Value>,
    #[serde(default)]
    pub friendly_message: Option<Value>,
}

impl ApiResponse {
    /// Decode a raw response body, unwrapping one level of string encoding.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner)?,
            other => other,
        };
        serde_json::from_value(value)
    }

    /// The numeric status code, accepting either a JSON number or a string
    /// of digits.
    pub fn status_code(&self) -> Option<i64> {
        match self.status_code.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code() == Some(STATUS_CREATED)
    }

    /// The `friendlyMessage` as display text. Absent or null gives an empty
    /// string; a non-string value is shown as its JSON text.
    pub fn message(&self) -> String {
        match &self.friendly_message {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
