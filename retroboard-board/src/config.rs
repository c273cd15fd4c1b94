//! Session configuration loaded through figment
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. An optional config file (TOML, YAML or JSON by extension)
//! 3. `RETROBOARD_*` environment variables

use crate::error::{BoardError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace};

/// Prefix for environment overrides, e.g. `RETROBOARD_STACK_DELAY_MS=400`
pub const ENV_PREFIX: &str = "RETROBOARD_";

/// What a drop outside every target does to the previewed board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutsidePolicy {
    /// Restore the board as it was at drag start
    #[default]
    Revert,
    /// Keep the last live preview as the final arrangement
    Keep,
}

/// Tunables for a board session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// How long a card must hover a stack target before stacking arms
    pub stack_delay_ms: u64,
    /// Length of one rendering frame for preview throttling
    pub frame_interval_ms: u64,
    /// Apply at most one live preview per frame
    pub throttle_previews: bool,
    pub drop_outside: DropOutsidePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stack_delay_ms: 600,
            frame_interval_ms: 16,
            throttle_previews: true,
            drop_outside: DropOutsidePolicy::Revert,
        }
    }
}

impl BoardConfig {
    /// Defaults overridden by the environment
    pub fn load() -> Result<Self> {
        Self::extract(Self::build_figment(None)?)
    }

    /// Defaults, then the file at `path`, then the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::extract(Self::build_figment(Some(path.as_ref()))?)
    }

    pub fn with_stack_delay_ms(mut self, ms: u64) -> Self {
        self.stack_delay_ms = ms;
        self
    }

    pub fn with_throttle(mut self, throttle: bool) -> Self {
        self.throttle_previews = throttle;
        self
    }

    pub fn with_drop_outside(mut self, policy: DropOutsidePolicy) -> Self {
        self.drop_outside = policy;
        self
    }

    pub fn stack_delay(&self) -> Duration {
        Duration::from_millis(self.stack_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval_ms == 0 {
            return Err(BoardError::invalid_value(
                "frame_interval_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    fn build_figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            // figment skips missing files silently; an explicit path must exist
            if !path.is_file() {
                return Err(BoardError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            trace!(path = %path.display(), "merging config file");
            figment = figment.merge(file_provider(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into())))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        debug!(?config, "loaded board config");
        Ok(config)
    }
}

fn file_provider(path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Figment::from(Yaml::file(path)),
        Some("json") => Figment::from(Json::file(path)),
        _ => Figment::from(Toml::file(path)),
    }
}
