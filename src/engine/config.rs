//! Game configuration loaded from TOML at startup.
//! Every key is optional; missing keys fall back to the built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_REVEAL_DELAY_MS: u64 = 600;
pub const DEFAULT_STORE_PATH: &str = "rps_store.json";

/// What the reset control does after clearing the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Stay on the game screen with fresh counters.
    #[default]
    InPlace,
    /// Go back to the name-entry screen, as a page reload would.
    Reload,
}

impl std::str::FromStr for ResetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_place" => Ok(ResetPolicy::InPlace),
            "reload" => Ok(ResetPolicy::Reload),
            other => Err(format!("unknown reset policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub reveal_delay_ms: u64,
    /// Reject new moves while a round result is still waiting to be shown.
    pub lock_input_during_reveal: bool,
    pub reset_policy: ResetPolicy,
    /// Seeds the opponent's RNG; unseeded when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            lock_input_during_reveal: true,
            reset_policy: ResetPolicy::InPlace,
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_STORE_PATH) }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameSettings,
    pub store: StoreSettings,
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try well-known paths, returning the defaults if none loads.
pub fn load_default_config() -> Config {
    let candidates = ["rps.toml", "../rps.toml", "/etc/rps/rps.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load config");
                }
            }
        }
    }
    tracing::info!("no rps.toml found, using built-in defaults");
    Config::default()
}
