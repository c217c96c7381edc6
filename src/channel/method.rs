// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Method channel call and response types.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Forward a message to the paired device.
pub const METHOD_SEND_MESSAGE: &str = "sendMessage";

/// Fetch the last message received from the paired device.
pub const METHOD_GET_DATA: &str = "getData";

/// Argument key carrying the outbound message text.
pub const ARG_MESSAGE: &str = "message";

/// A call arriving from the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name
    #[serde(rename = "m")]
    pub method: String,

    /// Method arguments (object keyed by argument name, or null)
    #[serde(rename = "a", default, skip_serializing_if = "Value::is_null")]
    pub args: Value,
}

impl MethodCall {
    /// Create a call with no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Value::Null,
        }
    }

    /// Attach an argument object.
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }

    /// Read a string argument. Absent, null, and non-string values all
    /// resolve to `None`.
    pub fn string_arg(&self, key: &str) -> Option<String> {
        self.args.get(key)?.as_str().map(str::to_string)
    }

    /// Serialize to JSON string with newline delimiter.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }

    /// Parse from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let call: Self = serde_json::from_str(json.trim())?;
        Ok(call)
    }
}

/// Outcome reported back to the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "r", rename_all = "snake_case")]
pub enum MethodResponse {
    /// The call was handled; `value` is null for fire-and-forget methods.
    Success {
        #[serde(rename = "v")]
        value: Value,
    },
    /// The call was handled and failed.
    Error {
        #[serde(rename = "c")]
        code: String,
        #[serde(rename = "m")]
        message: String,
        #[serde(rename = "d")]
        details: String,
    },
    /// The method is not handled by this channel.
    NotImplemented,
}

impl MethodResponse {
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    /// The fixed error payload reported when no message has been cached yet.
    pub fn no_data() -> Self {
        Self::Error {
            code: "null data for now1".to_string(),
            message: "null data for now2".to_string(),
            details: "null data for now3".to_string(),
        }
    }

    /// Serialize to JSON string with newline delimiter.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }

    /// Parse from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(json.trim())?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_serialization() {
        let call = MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": "hi" }));
        let json = call.to_json().unwrap();

        assert!(json.contains("\"m\":\"sendMessage\""));
        assert!(json.ends_with('\n'));

        let parsed = MethodCall::from_json(&json).unwrap();
        assert_eq!(parsed, call);
        assert_eq!(parsed.string_arg(ARG_MESSAGE), Some("hi".to_string()));
    }

    #[test]
    fn test_call_without_args() {
        let call = MethodCall::new(METHOD_GET_DATA);
        let json = call.to_json().unwrap();
        assert!(!json.contains("\"a\""));

        let parsed = MethodCall::from_json(&json).unwrap();
        assert_eq!(parsed.args, Value::Null);
        assert_eq!(parsed.string_arg(ARG_MESSAGE), None);
    }

    #[test]
    fn test_null_argument_reads_as_none() {
        let call = MethodCall::new(METHOD_SEND_MESSAGE).with_args(json!({ "message": null }));
        assert_eq!(call.string_arg(ARG_MESSAGE), None);
    }

    #[test]
    fn test_no_data_triple() {
        let response = MethodResponse::no_data();
        match &response {
            MethodResponse::Error {
                code,
                message,
                details,
            } => {
                assert_eq!(code, "null data for now1");
                assert_eq!(message, "null data for now2");
                assert_eq!(details, "null data for now3");
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_round_trip() {
        for response in [
            MethodResponse::success(Value::Null),
            MethodResponse::success(json!("cached")),
            MethodResponse::no_data(),
            MethodResponse::NotImplemented,
        ] {
            let json = response.to_json().unwrap();
            assert!(json.ends_with('\n'));
            assert_eq!(MethodResponse::from_json(&json).unwrap(), response);
        }
    }
}
