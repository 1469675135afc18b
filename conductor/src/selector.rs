use crate::element::UIElement;
use crate::errors::AutomationError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Represents ways to locate a UI element.
///
/// Selectors are declarative rules evaluated fresh against the live UI tree
/// on every query; they are never cached handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Select by platform accessibility role (e.g. "button", "textfield")
    Role(String),
    /// Select by accessibility ID
    Id(String),
    /// Select by name/label
    Name(String),
    /// Select by text content
    Text(String),
    /// Select by role plus an optional label, for disambiguation when a
    /// single field is not unique
    Combined {
        role: String,
        label: Option<String>,
    },
}

/// Wire representation used inside script documents:
/// `{ "type_": "role|id|name|text|combined", "value": "..." }`.
///
/// For `combined`, `value` carries a nested JSON object serialized as a
/// string, e.g. `"{\"role\":\"button\",\"label\":\"OK\"}"`.
#[derive(Debug, Serialize, Deserialize)]
struct SelectorSpec {
    #[serde(rename = "type_")]
    kind: String,
    value: String,
}

impl Selector {
    /// Build a selector from its wire representation.
    pub fn parse(kind: &str, value: &str) -> Result<Self, AutomationError> {
        match kind {
            "role" => Ok(Selector::Role(value.to_string())),
            "id" => Ok(Selector::Id(value.to_string())),
            "name" => Ok(Selector::Name(value.to_string())),
            "text" => Ok(Selector::Text(value.to_string())),
            "combined" => {
                let nested: serde_json::Value = serde_json::from_str(value).map_err(|e| {
                    AutomationError::InvalidSelector(format!(
                        "combined selector is not valid JSON: {e}"
                    ))
                })?;
                let role = nested
                    .get("role")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        AutomationError::InvalidSelector(
                            "combined selector is missing a 'role' field".to_string(),
                        )
                    })?;
                let label = nested.get("label").and_then(|v| v.as_str());
                Ok(Selector::Combined {
                    role: role.to_string(),
                    label: label.map(|s| s.to_string()),
                })
            }
            other => Err(AutomationError::InvalidSelector(format!(
                "unsupported selector type: '{other}'"
            ))),
        }
    }

    /// The wire name of this selector kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Selector::Role(_) => "role",
            Selector::Id(_) => "id",
            Selector::Name(_) => "name",
            Selector::Text(_) => "text",
            Selector::Combined { .. } => "combined",
        }
    }

    fn wire_value(&self) -> String {
        match self {
            Selector::Role(v) | Selector::Id(v) | Selector::Name(v) | Selector::Text(v) => {
                v.clone()
            }
            Selector::Combined { role, label } => {
                let nested = match label {
                    Some(label) => serde_json::json!({ "role": role, "label": label }),
                    None => serde_json::json!({ "role": role }),
                };
                nested.to_string()
            }
        }
    }

    /// Whether the given element snapshot satisfies this selector.
    ///
    /// Backends are free to match natively; this is the reference predicate
    /// used by backends that only expose a flat element dump.
    pub fn matches(&self, element: &UIElement) -> bool {
        match self {
            Selector::Role(role) => element.role.eq_ignore_ascii_case(role),
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Name(name) => element.label.as_deref() == Some(name.as_str()),
            Selector::Text(text) => {
                element
                    .value
                    .as_deref()
                    .is_some_and(|v| v.contains(text.as_str()))
                    || element
                        .label
                        .as_deref()
                        .is_some_and(|l| l.contains(text.as_str()))
            }
            Selector::Combined { role, label } => {
                element.role.eq_ignore_ascii_case(role)
                    && match label {
                        Some(label) => element.label.as_deref() == Some(label.as_str()),
                        None => true,
                    }
            }
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.wire_value())
    }
}

/// Parse the `kind:value` shorthand, e.g. `"role:button"` or `"#submit"`.
impl FromStr for Selector {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix('#') {
            return Ok(Selector::Id(id.to_string()));
        }
        match s.split_once(':') {
            Some((kind, value)) => Selector::parse(kind.trim(), value.trim()),
            // A bare word is a role, matching how scripts most commonly
            // address elements ("button", "textfield", ...).
            None => Ok(Selector::Role(s.to_string())),
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SelectorSpec {
            kind: self.kind().to_string(),
            value: self.wire_value(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = SelectorSpec::deserialize(deserializer)?;
        Selector::parse(&spec.kind, &spec.value).map_err(D::Error::custom)
    }
}
