use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// Opaque conversation correlation id assigned by the assistant backend on
/// the first turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct ChatSessionId(String);

impl ChatSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of `POST /agent/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<ChatSessionId>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), session_id: None }
    }

    pub fn session_id(mut self, session_id: Option<ChatSessionId>) -> Self {
        self.session_id = session_id;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatResponse {
    pub message: Option<String>,
    pub session_id: Option<ChatSessionId>,
    pub function_results: Option<Vec<FunctionResult>>,
}

/// Structured payload produced by one backend capability during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    /// Empty when the backend omits it; such results render as a raw dump.
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub function_name: String,
    #[serde(default)]
    pub data: Value,
}

impl FunctionResult {
    pub fn new(function_name: impl Into<String>, data: Value) -> Self {
        Self { function_name: function_name.into(), data }
    }
}
