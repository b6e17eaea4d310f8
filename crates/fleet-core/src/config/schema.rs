//! `fleet.toml` schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "https://api.fleethost.io/v1/".to_string()
}

fn default_poll_interval_ms() -> u64 {
    3_000
}

/// User-level configuration. Everything has a default except the machine
/// token, which is only required once a session is actually opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Base URL of the platform API.
    #[serde(default = "default_host")]
    pub host: String,

    /// Machine token used as the bearer credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_token: Option<String>,

    /// Delay between workflow polling passes.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            machine_token: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl FleetConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
