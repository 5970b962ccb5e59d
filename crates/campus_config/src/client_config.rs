use std::path::PathBuf;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::HttpConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
#[setters(into)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub http: HttpConfig,
    /// Overrides where the login session is persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    pub session_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            http: HttpConfig::default(),
            session_path: None,
        }
    }
}

impl ClientConfig {
    /// Directory holding client state, `~/.campus`.
    pub fn base_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".campus"))
            .unwrap_or(PathBuf::from(".").join(".campus"))
    }

    pub fn session_file(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(|| Self::base_path().join("session.json"))
    }

    pub fn config_path() -> PathBuf {
        Self::base_path().join("config.toml")
    }
}
