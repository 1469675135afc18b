use tracing::{debug, warn};

use crate::config::AutomationConfig;
use crate::errors::AutomationError;
use crate::platform::{InputTarget, PlatformBackend};
use std::sync::Arc;
use std::time::Duration;

/// Issues synthetic input events given concrete targets.
///
/// No element resolution happens here; callers supply an already-resolved
/// element or a coordinate. Composite gestures that need resolution first
/// (right-click at an element's center) live in the executor.
#[derive(Clone)]
pub struct Actuator {
    backend: Arc<dyn PlatformBackend>,
    double_click_interval: Duration,
}

impl Actuator {
    pub fn new(backend: Arc<dyn PlatformBackend>, config: &AutomationConfig) -> Self {
        Self {
            backend,
            double_click_interval: Duration::from_millis(config.double_click_interval_ms),
        }
    }

    pub fn click(&self, target: &InputTarget) -> Result<(), AutomationError> {
        debug!(?target, "click");
        self.backend.click(target)
    }

    pub fn move_to(&self, x: f64, y: f64) -> Result<(), AutomationError> {
        self.backend.move_pointer(x, y)
    }

    pub fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        debug!(len = text.len(), "typing text");
        self.backend.type_text(text)
    }

    pub fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        debug!(key, "pressing key");
        self.backend.press_key(key)
    }

    /// Double-click is not a native primitive on every platform, so it is
    /// emulated as two sequential clicks with a short inter-click delay.
    /// The substitution is surfaced through the log, never passed off
    /// silently as a native double-click.
    pub async fn double_click(&self, target: &InputTarget) -> Result<(), AutomationError> {
        warn!(
            interval_ms = self.double_click_interval.as_millis() as u64,
            "double_click emulated as two sequential clicks"
        );
        self.backend.click(target)?;
        tokio::time::sleep(self.double_click_interval).await;
        self.backend.click(target)
    }

    /// Hover has no portable synthetic-input primitive; the fallback is a
    /// click, surfaced through the log.
    pub fn hover(&self, target: &InputTarget) -> Result<(), AutomationError> {
        warn!("hover is not a native primitive, falling back to click");
        self.backend.click(target)
    }

    /// Move the pointer to the given coordinate, then issue a
    /// secondary-button click there.
    pub fn right_click_at(&self, x: f64, y: f64) -> Result<(), AutomationError> {
        debug!(x, y, "right-click");
        self.backend.move_pointer(x, y)?;
        self.backend.right_button_click()
    }
}
