use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::FunctionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One entry of the chat transcript. Turns are immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_results: Option<Vec<FunctionResult>>,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: TurnRole::User, content: content.into(), function_results: None }
    }

    pub fn assistant(
        content: impl Into<String>,
        function_results: Option<Vec<FunctionResult>>,
    ) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            function_results,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }

    pub fn function_results(&self) -> &[FunctionResult] {
        self.function_results.as_deref().unwrap_or_default()
    }
}

/// Append-only, order-preserving list of turns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drops every turn; used only when a conversation is discarded.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
