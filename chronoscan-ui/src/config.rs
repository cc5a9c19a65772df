//! Configuration for chronoscan-ui
//!
//! Resolution order (per tier, highest wins): TOML file located via
//! `chronoscan_common::config`, then `CHRONOSCAN_*` environment overrides
//! for the deployment-sensitive fields.

use chronoscan_common::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Environment variable naming an alternate config file path
pub const CONFIG_PATH_ENV: &str = "CHRONOSCAN_UI_CONFIG";

/// Module configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Upstream inference/report service settings
    pub upstream: UpstreamConfig,
    /// Workflow pacing knobs
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the analysis backend, e.g. `http://127.0.0.1:8000/api/v1`
    pub base_url: String,
    /// Bearer credential attached to every upstream request, if configured.
    /// The core is agnostic to how this token is obtained.
    pub bearer_token: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Pacing of the locally driven progress indicator and the failure fallback
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Progress tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Progress increment per tick
    pub tick_step: u8,
    /// Ceiling the indicator holds at until the upstream outcome is known
    pub upload_ceiling: u8,
    /// Delay between FAILED_FALLBACK and DONE in milliseconds
    pub fallback_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5810,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            bearer_token: None,
            request_timeout_secs: 30,
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 80,
            tick_step: 3,
            upload_ceiling: 40,
            fallback_delay_ms: 600,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            workflow: WorkflowConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

impl UiConfig {
    /// Load configuration: TOML tiers, then environment overrides
    pub fn load() -> Result<Self> {
        let mut config: UiConfig =
            chronoscan_common::config::resolve_module_config("chronoscan-ui", None, CONFIG_PATH_ENV)?;

        if let Ok(url) = std::env::var("CHRONOSCAN_UPSTREAM_URL") {
            info!("Upstream base URL overridden from environment");
            config.upstream.base_url = url;
        }
        if let Ok(token) = std::env::var("CHRONOSCAN_BEARER_TOKEN") {
            config.upstream.bearer_token = Some(token);
        }
        if let Ok(port) = std::env::var("CHRONOSCAN_UI_PORT") {
            match port.parse() {
                Ok(p) => config.server.port = p,
                Err(_) => tracing::warn!("Ignoring non-numeric CHRONOSCAN_UI_PORT: {port}"),
            }
        }

        Ok(config)
    }
}
