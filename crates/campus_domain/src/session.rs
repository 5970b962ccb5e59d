use std::fmt;

use derive_more::{Deref, From};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::{Role, UserProfile};

/// Bearer token issued by `/user/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, From, Deref)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// What the client persists between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option)]
pub struct Session {
    pub token: AuthToken,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl Session {
    pub fn new(token: AuthToken, role: Option<Role>) -> Self {
        Self { token, role, profile: None }
    }
}

/// Persistent storage for the single active session.
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get_session(&self) -> anyhow::Result<Option<Session>>;
    async fn store_session(&self, session: &Session) -> anyhow::Result<()>;
    async fn clear_session(&self) -> anyhow::Result<()>;
}
