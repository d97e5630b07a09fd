// ⚙️ Settings - host configuration loaded from JSON
// Defaults work without any file; WESPLIT_CONFIG or --config points at one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::tips::{TipSelection, DEFAULT_TIP_INDEX};

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "WESPLIT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for every displayed amount
    pub currency_symbol: String,

    /// Tip picked when a form opens (index into the tip table)
    pub default_tip_index: usize,

    /// Address the API server binds to
    pub listen_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: "$".to_string(),
            default_tip_index: DEFAULT_TIP_INDEX,
            listen_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;

        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON: {:?}", path.as_ref()))?;

        info!(path = ?path.as_ref(), "loaded settings");
        Ok(settings)
    }

    /// Explicit path first, then `WESPLIT_CONFIG`, then defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Settings::from_file(path),
            None => Ok(Settings::default()),
        }
    }

    /// The configured default tip, or 20% if the index is out of range
    pub fn default_tip(&self) -> TipSelection {
        TipSelection::new(self.default_tip_index).unwrap_or_else(|| {
            warn!(
                index = self.default_tip_index,
                "default_tip_index out of range, using {}",
                DEFAULT_TIP_INDEX
            );
            TipSelection::default()
        })
    }
}
