use crate::element::UIElement;
use crate::errors::AutomationError;
use crate::selector::Selector;

/// A concrete target for an input primitive: an already-resolved element
/// snapshot or a raw screen coordinate. Backends never resolve selectors on
/// behalf of an input call.
#[derive(Debug, Clone)]
pub enum InputTarget {
    Element(UIElement),
    Point { x: f64, y: f64 },
}

/// The capability boundary to the host platform.
///
/// Implementations wrap the platform accessibility and synthetic-input APIs
/// (or a test double). All calls are blocking calls into the platform with no
/// timeout layered on top; a hang in the platform layer hangs the calling
/// step unless the platform itself times out.
pub trait PlatformBackend: Send + Sync {
    /// Names of currently running user-facing applications, unfiltered.
    fn applications(&self) -> Result<Vec<String>, AutomationError>;

    /// Open an application by name through the OS-level launch facility.
    fn launch(&self, app: &str) -> Result<(), AutomationError>;

    /// Query the accessibility tree of `app` for elements matching
    /// `selector`, scanning at most `depth` levels and returning at most
    /// `limit` matches. `None` matches every element.
    ///
    /// Must fail with [`AutomationError::AppNotFound`] when the application
    /// cannot be reached at all; a query that succeeds with zero matches
    /// returns `Ok(vec![])`.
    fn elements(
        &self,
        app: &str,
        selector: Option<&Selector>,
        depth: usize,
        limit: usize,
    ) -> Result<Vec<UIElement>, AutomationError>;

    /// Synthesize a primary-button click on the target.
    fn click(&self, target: &InputTarget) -> Result<(), AutomationError>;

    /// Move the pointer to an absolute screen coordinate.
    fn move_pointer(&self, x: f64, y: f64) -> Result<(), AutomationError>;

    /// Synthesize a secondary-button click at the current pointer position.
    fn right_button_click(&self) -> Result<(), AutomationError>;

    /// Type a string into the currently focused context.
    fn type_text(&self, text: &str) -> Result<(), AutomationError>;

    /// Send a named key (e.g. "Return", "Tab") to the focused context.
    fn press_key(&self, key: &str) -> Result<(), AutomationError>;
}
