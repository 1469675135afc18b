use tracing::{debug, instrument, warn};

use crate::config::AutomationConfig;
use crate::element::UIElement;
use crate::errors::AutomationError;
use crate::platform::PlatformBackend;
use crate::selector::Selector;
use std::sync::Arc;

// How much wider than the configured defaults the child probe scans.
const CHILD_PROBE_DEPTH_FACTOR: usize = 2;
const CHILD_PROBE_RESULT_FACTOR: usize = 4;

/// A high-level API for finding UI elements.
///
/// Wraps the raw platform accessibility query with adapter-level defaults
/// for depth and result caps, and with the geometric child-detection
/// heuristic (see [`Locator::children_of`]).
#[derive(Clone)]
pub struct Locator {
    backend: Arc<dyn PlatformBackend>,
    max_depth: usize,
    max_results: usize,
}

impl Locator {
    pub fn new(backend: Arc<dyn PlatformBackend>, config: &AutomationConfig) -> Self {
        Self {
            backend,
            max_depth: config.max_search_depth,
            max_results: config.max_search_results,
        }
    }

    /// The application's top-level elements only, without descending into
    /// the tree and without loading children.
    #[instrument(level = "debug", skip(self))]
    pub fn top_level(&self, app: &str) -> Result<Vec<UIElement>, AutomationError> {
        let elements = self.backend.elements(app, None, 1, self.max_results)?;
        debug!(count = elements.len(), "found top-level elements");
        Ok(elements)
    }

    /// All elements in `app` matching `selector`, scanning up to `depth`
    /// levels and capping at `limit` matches (adapter defaults when omitted).
    /// Zero matches is a successful empty result; an unreachable application
    /// is an error.
    #[instrument(level = "debug", skip(self, selector))]
    pub fn query(
        &self,
        app: &str,
        selector: &Selector,
        depth: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Vec<UIElement>, AutomationError> {
        let depth = depth.unwrap_or(self.max_depth);
        let limit = limit.unwrap_or(self.max_results);
        let elements = self.backend.elements(app, Some(selector), depth, limit)?;
        debug!(
            selector = %selector,
            count = elements.len(),
            "selector query finished"
        );
        Ok(elements)
    }

    /// First element matching `selector`, or `ElementNotFound`.
    pub fn first(&self, app: &str, selector: &Selector) -> Result<UIElement, AutomationError> {
        self.query(app, selector, None, None)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AutomationError::ElementNotFound(format!(
                    "no element matching '{selector}' in application '{app}'"
                ))
            })
    }

    /// Approximate the children of `parent` by re-querying the application
    /// broadly and keeping candidates whose bounding rectangle is fully
    /// contained within the parent's rectangle.
    ///
    /// Child enumeration is not a first-class operation of the underlying
    /// platform API, so this is a documented heuristic rather than a
    /// guarantee of logical parent/child fidelity: elements without reported
    /// bounds can never be classified as children, and unrelated elements
    /// whose bounds happen to fall inside the parent are false positives.
    #[instrument(level = "debug", skip(self, parent))]
    pub fn children_of(
        &self,
        app: &str,
        parent: &UIElement,
    ) -> Result<Vec<UIElement>, AutomationError> {
        let Some(parent_bounds) = parent.bounds else {
            warn!(
                element_ref = %parent.element_ref,
                "parent has no reported bounds, geometric child detection cannot run"
            );
            return Ok(Vec::new());
        };

        let candidates = self.backend.elements(
            app,
            None,
            self.max_depth.saturating_mul(CHILD_PROBE_DEPTH_FACTOR),
            self.max_results.saturating_mul(CHILD_PROBE_RESULT_FACTOR),
        )?;

        let children: Vec<UIElement> = candidates
            .into_iter()
            .filter(|candidate| {
                if candidate.element_ref == parent.element_ref {
                    return false;
                }
                match candidate.bounds {
                    // An identical rectangle is almost certainly the parent
                    // re-found under another snapshot, not a child.
                    Some(b) => b != parent_bounds && parent_bounds.contains(&b),
                    None => false,
                }
            })
            .collect();

        debug!(count = children.len(), "geometric child probe finished");
        Ok(children)
    }
}
