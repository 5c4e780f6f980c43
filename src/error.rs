use std::fmt;

/// Produced at construction time when a rule declaration cannot be resolved.
///
/// Configuration errors are fatal and abort session construction. Rule
/// *failures* are never represented here — they accumulate in the
/// [`ErrorBag`](crate::error_bag::ErrorBag) instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A rule name has no entry in the registry.
    UnknownRule { name: String },
    /// A rule spec value has a shape other than string or array of strings.
    /// `found` names the offending JSON type.
    InvalidRuleSpec { path: String, found: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownRule { name } => {
                write!(f, "rule not found: {}", name)
            }
            ConfigError::InvalidRuleSpec { path, found } => {
                write!(
                    f,
                    "rule spec for '{}' must be a string or an array of strings, {} given",
                    path, found
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Name of a JSON value's type, for [`ConfigError::InvalidRuleSpec`].
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
