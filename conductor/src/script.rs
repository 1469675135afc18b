use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AutomationError;
use crate::executor::{ActionResult, ActionVerb, Executor};
use crate::selector::Selector;
use std::time::Duration;

/// One validated instruction inside a script.
///
/// Built eagerly from the loose JSON document before any execution begins,
/// with the verb as the discriminant for which fields are required; a step
/// that reaches the interpreter is structurally complete for its verb.
#[derive(Debug, Clone)]
pub struct AutomationStep {
    pub name: Option<String>,
    pub action: ActionVerb,
    pub app: String,
    pub selector: Option<Selector>,
    pub text: Option<String>,
    pub wait: Option<Duration>,
}

impl AutomationStep {
    /// Human-readable label for error attribution: the step's name when it
    /// has one, always carrying the 1-based index.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("step {index} (\"{name}\")"),
            None => format!("step {index}"),
        }
    }
}

/// A parsed script document, normalized to an ordered step list.
///
/// Wire format is either a single implicit step (top-level `app`, `selector`,
/// `action`, optional `text`) or `{ "steps": [...] }`. Single-step documents
/// become a one-element list so the interpreter has one code path.
#[derive(Debug, Clone)]
pub struct AutomationScript {
    pub steps: Vec<AutomationStep>,
}

/// Loose wire shapes, before per-verb validation.
#[derive(Debug, Default, Deserialize)]
struct RawStep {
    name: Option<String>,
    action: Option<String>,
    app: Option<String>,
    selector: Option<RawSelector>,
    text: Option<String>,
    wait: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawSelector {
    #[serde(rename = "type_")]
    kind: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScript {
    steps: Option<Vec<RawStep>>,
    #[serde(flatten)]
    single: RawStep,
}

impl AutomationScript {
    /// Parse and validate a script document.
    ///
    /// Validation failures name the offending step by 1-based index and name,
    /// and no step executes until the whole document has validated.
    pub fn parse(source: &str) -> Result<Self, AutomationError> {
        let raw: RawScript = serde_json::from_str(source)
            .map_err(|e| AutomationError::InvalidScript(format!("not a valid script: {e}")))?;

        let steps = match raw.steps {
            Some(raw_steps) => {
                if raw_steps.is_empty() {
                    return Err(AutomationError::InvalidScript(
                        "script has an empty step list".to_string(),
                    ));
                }
                raw_steps
                    .into_iter()
                    .enumerate()
                    .map(|(i, step)| validate_step(step, i + 1))
                    .collect::<Result<Vec<_>, _>>()?
            }
            None => vec![validate_step(raw.single, 1)?],
        };

        Ok(Self { steps })
    }

    pub fn is_multi_step(&self) -> bool {
        self.steps.len() > 1
    }
}

fn validate_step(raw: RawStep, index: usize) -> Result<AutomationStep, AutomationError> {
    let label = match &raw.name {
        Some(name) => format!("step {index} (\"{name}\")"),
        None => format!("step {index}"),
    };
    let invalid = |what: &str| AutomationError::InvalidScript(format!("{label}: {what}"));

    // Missing action defaults to a plain click, matching the documented
    // single-step shorthand.
    let action = match raw.action.as_deref() {
        Some(verb) => ActionVerb::parse(verb).map_err(|e| invalid(&e.to_string()))?,
        None => ActionVerb::Click,
    };

    let app = raw
        .app
        .filter(|app| !app.is_empty())
        .ok_or_else(|| invalid("missing application name"))?;

    // launch_app addresses the whole application and key_press addresses the
    // focused context; any selector present on those steps is ignored.
    let selector = if action.requires_selector() {
        let raw_selector = raw.selector.ok_or_else(|| invalid("missing selector"))?;
        let kind = raw_selector
            .kind
            .ok_or_else(|| invalid("missing selector type"))?;
        let value = raw_selector
            .value
            .ok_or_else(|| invalid("missing selector value"))?;
        Some(Selector::parse(&kind, &value).map_err(|e| invalid(&e.to_string()))?)
    } else {
        None
    };

    let text = match action {
        ActionVerb::InputText => {
            Some(raw.text.ok_or_else(|| invalid("missing text for input_text"))?)
        }
        ActionVerb::KeyPress => {
            Some(raw.text.ok_or_else(|| invalid("missing key for key_press"))?)
        }
        _ => raw.text,
    };

    Ok(AutomationStep {
        name: raw.name,
        action,
        app,
        selector,
        text,
        wait: raw.wait.map(Duration::from_millis),
    })
}

/// Runs parsed scripts step by step.
///
/// Strictly sequential: step `i + 1` never begins before step `i` completes.
/// The first failing step aborts the remainder and the overall error names
/// that step; side effects already performed by earlier steps are not undone.
#[derive(Clone)]
pub struct Interpreter {
    executor: Executor,
}

impl Interpreter {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Parse and run a script document. Parse and validation failures are
    /// returned as a failed `ActionResult`; this entry point never raises.
    pub async fn run_source(&self, source: &str) -> ActionResult {
        match AutomationScript::parse(source) {
            Ok(script) => self.run(&script).await,
            Err(e) => ActionResult::err(e.to_string()),
        }
    }

    pub async fn run(&self, script: &AutomationScript) -> ActionResult {
        let total = script.steps.len();
        for (i, step) in script.steps.iter().enumerate() {
            let index = i + 1;
            info!(
                "executing {}/{total}: {} ({})",
                index,
                step.label(index),
                step.action
            );

            let result = self
                .executor
                .perform(
                    &step.app,
                    step.selector.as_ref(),
                    step.action,
                    step.text.as_deref(),
                )
                .await;

            if !result.success {
                let cause = result
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                return ActionResult::err(format!("{} failed: {cause}", step.label(index)));
            }

            if let Some(wait) = step.wait {
                debug!(wait_ms = wait.as_millis() as u64, "inter-step wait");
                tokio::time::sleep(wait).await;
            }
        }
        ActionResult::ok()
    }
}
