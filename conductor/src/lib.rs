//! Desktop UI automation scripting through accessibility APIs
//!
//! This crate locates operating-system UI elements by heuristic selectors,
//! performs synthetic input actions on them, and executes declarative
//! multi-step scripts with ordering, timing, and fail-fast semantics.
//! The platform accessibility and input primitives themselves are consumed
//! through the [`PlatformBackend`] seam; this crate supplies everything
//! above it.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

pub mod actuator;
pub mod config;
pub mod element;
pub mod errors;
pub mod executor;
pub mod locator;
pub mod platform;
pub mod repository;
pub mod script;
pub mod selector;
pub mod template;
#[cfg(test)]
mod tests;

pub use actuator::Actuator;
pub use config::AutomationConfig;
pub use element::{Bounds, UIElement};
pub use errors::AutomationError;
pub use executor::{ActionResult, ActionVerb, Executor};
pub use locator::Locator;
pub use platform::{InputTarget, PlatformBackend};
pub use repository::{ScriptPreview, ScriptRecord, ScriptRepository};
pub use script::{AutomationScript, AutomationStep, Interpreter};
pub use selector::Selector;
pub use template::ScriptTemplate;

/// Name patterns of system and background processes that are dropped from
/// the user-facing application list.
const SYSTEM_APP_PATTERNS: &[&str] = &[
    "System",
    "ControlCenter",
    "Finder",
    "WindowServer",
    "Dock",
    "Spotlight",
    "CoreServices",
    "loginwindow",
    "Notification",
    "StatusBar",
    "SystemUIServer",
    "Helper",
    "Agent",
    "daemon",
    "service",
    "background",
    "extension",
    "plugin",
    "Window Manager",
];

/// The main entry point for UI automation.
///
/// Holds the platform capability and the configuration context, and vends
/// the individual components wired to both.
pub struct Automation {
    backend: Arc<dyn PlatformBackend>,
    config: AutomationConfig,
}

impl Automation {
    pub fn new(backend: Arc<dyn PlatformBackend>, config: AutomationConfig) -> Self {
        Self { backend, config }
    }

    /// Construct with default configuration.
    pub fn with_defaults(backend: Arc<dyn PlatformBackend>) -> Self {
        Self::new(backend, AutomationConfig::default())
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    pub fn locator(&self) -> Locator {
        Locator::new(self.backend.clone(), &self.config)
    }

    pub fn actuator(&self) -> Actuator {
        Actuator::new(self.backend.clone(), &self.config)
    }

    pub fn executor(&self) -> Executor {
        Executor::new(self.backend.clone(), &self.config)
    }

    pub fn interpreter(&self) -> Interpreter {
        Interpreter::new(self.executor())
    }

    pub fn repository(&self) -> ScriptRepository {
        ScriptRepository::new(self.config.scripts_dir.clone())
    }

    /// Names of running user-facing applications: deduplicated, stripped of
    /// system/background processes by name-pattern denylist, and sorted
    /// alphabetically.
    #[instrument(skip(self))]
    pub fn applications(&self) -> Result<Vec<String>, AutomationError> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = self
            .backend
            .applications()?
            .into_iter()
            .filter(|name| {
                seen.insert(name.clone())
                    && !SYSTEM_APP_PATTERNS
                        .iter()
                        .any(|pattern| name.contains(pattern))
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

impl Clone for Automation {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            config: self.config.clone(),
        }
    }
}
