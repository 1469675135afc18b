use serde::{Deserialize, Serialize};

/// Canned starting points for new script documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTemplate {
    Basic,
    AppLaunch,
    MultiStep,
    TextInput,
}

impl ScriptTemplate {
    /// The template body, valid JSON with placeholder values.
    pub fn content(&self) -> &'static str {
        match self {
            ScriptTemplate::Basic => {
                r#"{
  "app": "Application name",
  "selector": {
    "type_": "role",
    "value": "button"
  },
  "action": "click"
}"#
            }
            ScriptTemplate::AppLaunch => {
                r#"{
  "steps": [
    {
      "name": "Launch the application",
      "action": "launch_app",
      "app": "Application name",
      "wait": 2000
    },
    {
      "name": "Click an element",
      "action": "click",
      "app": "Application name",
      "selector": {
        "type_": "role",
        "value": "button"
      }
    }
  ]
}"#
            }
            ScriptTemplate::MultiStep => {
                r#"{
  "steps": [
    {
      "name": "First step",
      "action": "click",
      "app": "Application name",
      "selector": {
        "type_": "role",
        "value": "button"
      },
      "wait": 1000
    },
    {
      "name": "Second step",
      "action": "click",
      "app": "Application name",
      "selector": {
        "type_": "role",
        "value": "button"
      }
    }
  ]
}"#
            }
            ScriptTemplate::TextInput => {
                r#"{
  "steps": [
    {
      "name": "Click the input field",
      "action": "click",
      "app": "Application name",
      "selector": {
        "type_": "role",
        "value": "textfield"
      },
      "wait": 500
    },
    {
      "name": "Type the text",
      "action": "input_text",
      "app": "Application name",
      "selector": {
        "type_": "role",
        "value": "textfield"
      },
      "text": "Text to type"
    }
  ]
}"#
            }
        }
    }
}
