//! Shared stub backend for exercising the engine without a real desktop.

use crate::element::{Bounds, UIElement};
use crate::errors::AutomationError;
use crate::platform::{InputTarget, PlatformBackend};
use crate::selector::Selector;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

/// One recorded input or launch call.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Primary-button click; carries the target's display name or coordinate.
    Click(String),
    MovePointer(f64, f64),
    RightButtonClick,
    TypeText(String),
    PressKey(String),
    Launch(String),
}

/// A scriptable in-memory desktop: registered apps with flat element dumps
/// (tagged with the depth at which they sit), recording every input call
/// with a timestamp.
#[derive(Default)]
pub struct RecordingBackend {
    apps: Mutex<HashMap<String, Vec<(usize, UIElement)>>>,
    /// Extra names reported by `applications()` verbatim, so tests can
    /// simulate the raw platform list containing duplicates.
    extra_app_names: Mutex<Vec<String>>,
    events: Mutex<Vec<Event>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a running application with no elements.
    pub fn register_app(&self, app: &str) {
        self.apps.lock().unwrap().entry(app.to_string()).or_default();
    }

    /// Report an extra raw application name without registering elements.
    pub fn add_raw_app_name(&self, name: &str) {
        self.extra_app_names.lock().unwrap().push(name.to_string());
    }

    /// Register an element of `app` at the given tree depth (1 = top level).
    pub fn add_element(&self, app: &str, depth: usize, element: UIElement) {
        self.apps
            .lock()
            .unwrap()
            .entry(app.to_string())
            .or_default()
            .push((depth, element));
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clicks_on(&self, target: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(&e.kind, EventKind::Click(t) if t == target))
            .count()
    }

    fn record(&self, kind: EventKind) {
        self.events.lock().unwrap().push(Event {
            kind,
            at: Instant::now(),
        });
    }
}

impl PlatformBackend for RecordingBackend {
    fn applications(&self) -> Result<Vec<String>, AutomationError> {
        let mut names: Vec<String> = self.apps.lock().unwrap().keys().cloned().collect();
        names.extend(self.extra_app_names.lock().unwrap().iter().cloned());
        Ok(names)
    }

    fn launch(&self, app: &str) -> Result<(), AutomationError> {
        self.record(EventKind::Launch(app.to_string()));
        self.register_app(app);
        Ok(())
    }

    fn elements(
        &self,
        app: &str,
        selector: Option<&Selector>,
        depth: usize,
        limit: usize,
    ) -> Result<Vec<UIElement>, AutomationError> {
        let apps = self.apps.lock().unwrap();
        let elements = apps
            .get(app)
            .ok_or_else(|| AutomationError::AppNotFound(app.to_string()))?;

        Ok(elements
            .iter()
            .filter(|(d, _)| *d <= depth)
            .map(|(_, e)| e.clone())
            .filter(|e| selector.is_none_or(|s| s.matches(e)))
            .take(limit)
            .collect())
    }

    fn click(&self, target: &InputTarget) -> Result<(), AutomationError> {
        let described = match target {
            InputTarget::Element(e) => e.display_name(),
            InputTarget::Point { x, y } => format!("({x}, {y})"),
        };
        self.record(EventKind::Click(described));
        Ok(())
    }

    fn move_pointer(&self, x: f64, y: f64) -> Result<(), AutomationError> {
        self.record(EventKind::MovePointer(x, y));
        Ok(())
    }

    fn right_button_click(&self) -> Result<(), AutomationError> {
        self.record(EventKind::RightButtonClick);
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.record(EventKind::TypeText(text.to_string()));
        Ok(())
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.record(EventKind::PressKey(key.to_string()));
        Ok(())
    }
}

pub fn button(label: &str) -> UIElement {
    UIElement::new("button").with_label(label)
}

pub fn textfield(label: &str) -> UIElement {
    UIElement::new("textfield").with_label(label)
}

pub fn bounded(element: UIElement, x: f64, y: f64, w: f64, h: f64) -> UIElement {
    element.with_bounds(Bounds::new(x, y, w, h))
}
