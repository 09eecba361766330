// =============================================================================
// Runtime Configuration — engine settings loaded from JSON
// =============================================================================
//
// Bind address, history policy and indicator lookbacks.  All fields carry a
// serde default so that a partial file still loads; lookbacks are validated
// before the config is accepted.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{IndicatorEngine, IndicatorParams, MinimumHistoryPolicy};

pub const DEFAULT_CONFIG_PATH: &str = "indicator_desk.json";

const ENV_BIND_ADDR: &str = "INDICATOR_DESK_BIND_ADDR";
const ENV_POLICY: &str = "INDICATOR_DESK_POLICY";

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the REST facade listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// How much aligned history a computation requires.
    #[serde(default)]
    pub history_policy: MinimumHistoryPolicy,

    /// Indicator lookbacks.
    #[serde(default)]
    pub indicators: IndicatorParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            history_policy: MinimumHistoryPolicy::default(),
            indicators: IndicatorParams::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file, malformed JSON or unusable indicator lookbacks all
    /// return an error so the caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        config
            .indicators
            .validate()
            .with_context(|| format!("invalid indicator settings in {}", path.display()))?;

        info!(
            path = %path.display(),
            policy = %config.history_policy,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `INDICATOR_DESK_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_BIND_ADDR).ok(),
            std::env::var(ENV_POLICY).ok(),
        );
    }

    fn apply_overrides(&mut self, bind_addr: Option<String>, policy: Option<String>) {
        if let Some(addr) = bind_addr.filter(|a| !a.trim().is_empty()) {
            self.bind_addr = addr.trim().to_string();
        }
        if let Some(mode) = policy {
            match MinimumHistoryPolicy::from_mode(&mode) {
                Some(p) => self.history_policy = p,
                None => warn!(value = %mode, "ignoring unknown {ENV_POLICY} value"),
            }
        }
    }

    /// Build the engine this configuration describes.
    pub fn engine(&self) -> IndicatorEngine {
        IndicatorEngine::new(self.indicators, self.history_policy)
    }
}
