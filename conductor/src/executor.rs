use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::actuator::Actuator;
use crate::config::AutomationConfig;
use crate::element::UIElement;
use crate::errors::AutomationError;
use crate::locator::Locator;
use crate::platform::{InputTarget, PlatformBackend};
use crate::selector::Selector;
use std::sync::Arc;
use std::time::Duration;

/// Key sent by `key_press` when no key is named.
pub const CONFIRM_KEY: &str = "Return";

/// The verbs a script step may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionVerb {
    Click,
    Hover,
    Focus,
    GetText,
    InputText,
    KeyPress,
    DoubleClick,
    RightClick,
    LaunchApp,
}

impl ActionVerb {
    pub fn parse(s: &str) -> Result<Self, AutomationError> {
        match s {
            "click" => Ok(Self::Click),
            "hover" => Ok(Self::Hover),
            "focus" => Ok(Self::Focus),
            "get_text" => Ok(Self::GetText),
            "input_text" => Ok(Self::InputText),
            "key_press" => Ok(Self::KeyPress),
            "double_click" => Ok(Self::DoubleClick),
            "right_click" => Ok(Self::RightClick),
            "launch_app" => Ok(Self::LaunchApp),
            other => Err(AutomationError::UnsupportedOperation(format!(
                "unknown action verb: '{other}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Focus => "focus",
            Self::GetText => "get_text",
            Self::InputText => "input_text",
            Self::KeyPress => "key_press",
            Self::DoubleClick => "double_click",
            Self::RightClick => "right_click",
            Self::LaunchApp => "launch_app",
        }
    }

    /// Whether this verb targets an element and therefore needs a selector.
    /// `key_press` addresses the focused context and `launch_app` addresses
    /// the whole application.
    pub fn requires_selector(&self) -> bool {
        !matches!(self, Self::KeyPress | Self::LaunchApp)
    }
}

impl std::fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result of one action or one script run.
///
/// `error` is `None` exactly when `success` is true; when false it carries a
/// short human-readable cause with no stack traces or internal identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Executes one action verb against one application.
///
/// State-free request/response with no internal retries; failures propagate
/// immediately to the caller as an `ActionResult`. The public entry point
/// never raises.
#[derive(Clone)]
pub struct Executor {
    backend: Arc<dyn PlatformBackend>,
    locator: Locator,
    actuator: Actuator,
    launch_settle: Duration,
}

impl Executor {
    pub fn new(backend: Arc<dyn PlatformBackend>, config: &AutomationConfig) -> Self {
        Self {
            locator: Locator::new(backend.clone(), config),
            actuator: Actuator::new(backend.clone(), config),
            backend,
            launch_settle: Duration::from_millis(config.launch_settle_ms),
        }
    }

    /// Resolve `selector` in `app` and perform `verb` on the match.
    ///
    /// Total over its inputs: any resolution, validation, or platform error
    /// is converted into `ActionResult { success: false, .. }`.
    #[instrument(level = "debug", skip(self, selector, text))]
    pub async fn perform(
        &self,
        app: &str,
        selector: Option<&Selector>,
        verb: ActionVerb,
        text: Option<&str>,
    ) -> ActionResult {
        match self.dispatch(app, selector, verb, text).await {
            Ok(()) => ActionResult::ok(),
            Err(e) => ActionResult::err(e.to_string()),
        }
    }

    async fn dispatch(
        &self,
        app: &str,
        selector: Option<&Selector>,
        verb: ActionVerb,
        text: Option<&str>,
    ) -> Result<(), AutomationError> {
        match verb {
            ActionVerb::LaunchApp => self.launch_app(app).await,
            ActionVerb::KeyPress => {
                // Bypasses the locator entirely; goes to the focused context.
                let key = text.unwrap_or(CONFIRM_KEY);
                self.actuator.press_key(key)
            }
            ActionVerb::InputText => {
                let input = text.ok_or_else(|| {
                    AutomationError::InvalidArgument("missing text for input_text".to_string())
                })?;
                let element = self.resolve(app, selector, verb)?;
                // Click first so the element takes keyboard focus.
                self.actuator.click(&InputTarget::Element(element))?;
                self.actuator.type_text(input)
            }
            ActionVerb::Click | ActionVerb::Focus => {
                let element = self.resolve(app, selector, verb)?;
                self.actuator.click(&InputTarget::Element(element))
            }
            ActionVerb::GetText => {
                let element = self.resolve(app, selector, verb)?;
                // Empty text is still a success; only resolution can fail.
                let text = element.value.clone().unwrap_or_default();
                info!(element = %element.display_name(), %text, "read element text");
                Ok(())
            }
            ActionVerb::DoubleClick => {
                let element = self.resolve(app, selector, verb)?;
                self.actuator
                    .double_click(&InputTarget::Element(element))
                    .await
            }
            ActionVerb::Hover => {
                let element = self.resolve(app, selector, verb)?;
                self.actuator.hover(&InputTarget::Element(element))
            }
            ActionVerb::RightClick => {
                let element = self.resolve(app, selector, verb)?;
                let bounds = element.bounds.ok_or_else(|| {
                    AutomationError::PlatformError(format!(
                        "element '{}' reports no bounds, cannot right-click",
                        element.display_name()
                    ))
                })?;
                let (x, y) = bounds.center();
                self.actuator.right_click_at(x, y)
            }
        }
    }

    fn resolve(
        &self,
        app: &str,
        selector: Option<&Selector>,
        verb: ActionVerb,
    ) -> Result<UIElement, AutomationError> {
        let selector = selector.ok_or_else(|| {
            AutomationError::InvalidArgument(format!("action '{verb}' requires a selector"))
        })?;
        self.locator.first(app, selector)
    }

    /// No-op if the application is already running; otherwise launch it and
    /// wait a fixed settle delay before returning.
    async fn launch_app(&self, app: &str) -> Result<(), AutomationError> {
        let running = self.backend.applications()?;
        if running.iter().any(|name| name == app) {
            info!(app, "application already running, skipping launch");
            return Ok(());
        }
        self.backend.launch(app)?;
        debug!(
            app,
            settle_ms = self.launch_settle.as_millis() as u64,
            "launched application, waiting for it to settle"
        );
        tokio::time::sleep(self.launch_settle).await;
        Ok(())
    }
}
