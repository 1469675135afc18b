use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Absolute screen rectangle of an element, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `other` lies fully inside this rectangle (edges inclusive).
    pub fn contains(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// A snapshot of one on-screen control, as reported by the platform
/// accessibility tree.
///
/// Snapshots are ephemeral: they are rebuilt on every locator query and are
/// never persisted. Re-resolving an element always goes through a fresh
/// selector query, not through a stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIElement {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Hint that descendant elements may exist. Not a guarantee; some
    /// platforms report this without being able to enumerate children.
    #[serde(default)]
    pub has_children: bool,
    /// Populated only by an explicit child fetch; `None` until then.
    /// An empty or absent list does not imply the element is childless,
    /// `has_children` is the authoritative (if imprecise) signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<UIElement>>,
    /// Opaque identifier generated locally at snapshot time, used only to
    /// correlate a tree node across asynchronous lazy-load calls. Never used
    /// to re-resolve the live element.
    #[serde(default)]
    pub element_ref: String,
}

impl UIElement {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            id: None,
            label: None,
            value: None,
            bounds: None,
            has_children: false,
            children: None,
            element_ref: next_element_ref(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Get a display name for this element
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .or_else(|| self.value.clone())
            .unwrap_or_else(|| self.role.clone())
    }
}

/// Generate a process-unique correlation id. Combines the wall clock with a
/// monotonic counter so two snapshots taken in the same instant still differ.
fn next_element_ref() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", nanos % 10_000_000_000, seq)
}
