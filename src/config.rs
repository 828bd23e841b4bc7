//! Runtime configuration read from environment variables.
//!
//! - `TUI_2048_SEED`: fixed RNG seed (u64). Unset means OS entropy.
//! - `TUI_2048_BEST_PATH`: best-score file (default `$HOME/.tui-2048/best.json`)
//! - `TUI_2048_NO_PERSIST`: set to "1" or "true" to keep the best score in memory only
//! - `TUI_2048_LOG`: log file path. Unset means logging is off.

use std::env;
use std::path::PathBuf;

const DEFAULT_BEST_FILE: &str = "best.json";
const DEFAULT_DATA_DIR: &str = ".tui-2048";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub best_path: PathBuf,
    pub persist: bool,
    pub log_path: Option<PathBuf>,
    /// `TUI_2048_SEED` when it was set but not a valid u64.
    pub invalid_seed: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let (seed, invalid_seed) = match non_empty("TUI_2048_SEED") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(seed) => (Some(seed), None),
                Err(_) => (None, Some(raw)),
            },
            None => (None, None),
        };

        let best_path = non_empty("TUI_2048_BEST_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let home = non_empty("HOME").map(PathBuf::from).unwrap_or_default();
                home.join(DEFAULT_DATA_DIR).join(DEFAULT_BEST_FILE)
            });

        let persist = !non_empty("TUI_2048_NO_PERSIST")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let log_path = non_empty("TUI_2048_LOG").map(PathBuf::from);

        Self {
            seed,
            best_path,
            persist,
            log_path,
            invalid_seed,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
