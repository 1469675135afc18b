use crate::errors::AutomationError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Process-wide automation settings, carried as an explicit value with a
/// load-on-start / explicit-save boundary rather than a module-level
/// singleton. Every component that needs a tunable takes it from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Directory holding persisted script documents.
    pub scripts_dir: PathBuf,
    /// Default depth cap for selector queries.
    pub max_search_depth: usize,
    /// Default result cap for selector queries.
    pub max_search_results: usize,
    /// Fixed settle delay after launching an application, in milliseconds.
    pub launch_settle_ms: u64,
    /// Inter-click delay used when emulating a double-click, in milliseconds.
    pub double_click_interval_ms: u64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("automation_scripts"),
            max_search_depth: 10,
            max_search_results: 100,
            launch_settle_ms: 2000,
            double_click_interval_ms: 100,
        }
    }
}

impl AutomationConfig {
    /// Read a config file, JSON-encoded. Unknown fields are ignored and
    /// missing fields fall back to defaults, so older files keep loading.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AutomationError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AutomationError::InvalidArgument(format!("invalid config file: {e}")))
    }

    /// Persist the current settings, overwriting the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AutomationError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AutomationError::InvalidArgument(format!("config serialization: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
