use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeouts applied to every backend call, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout: u64,
    /// Upper bound for a whole request, including an assistant turn. Expiry
    /// is reported as a failed send.
    pub request_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            request_timeout: 30,
        }
    }
}

impl HttpConfig {
    pub fn connect_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn request_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
