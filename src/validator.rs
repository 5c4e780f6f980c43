//! The rule registry façade: maps rule names to shared rule instances and
//! builds validation sessions.

use crate::error::ConfigError;
use crate::rule::{Rule, RuleBinding};
use crate::rules;
use crate::validation::Validation;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of named rules.
///
/// New rules are added by registration, never by name-mangling magic; the
/// default registry carries the built-in set. Cloning shares the underlying
/// rule instances.
#[derive(Clone)]
pub struct Validator {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        let mut validator = Validator::empty();
        for (name, rule) in rules::builtins() {
            validator.rules.insert(name.to_string(), rule);
        }
        validator
    }
}

impl Validator {
    /// A registry with no rules at all. Useful for embedding a fully custom
    /// rule set.
    pub fn empty() -> Self {
        Validator {
            rules: HashMap::new(),
        }
    }

    /// A registry seeded with the built-in rules.
    pub fn new() -> Self {
        Validator::default()
    }

    /// Registers (or replaces) a rule under `name`.
    pub fn register(&mut self, name: impl Into<String>, rule: Arc<dyn Rule>) {
        self.rules.insert(name.into(), rule);
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Resolves a rule name and its configured parameters into a binding.
    pub fn resolve(&self, name: &str, params: Vec<String>) -> Result<RuleBinding, ConfigError> {
        match self.rules.get(name) {
            Some(rule) => Ok(RuleBinding::new(name, params, Arc::clone(rule))),
            None => Err(ConfigError::UnknownRule {
                name: name.to_string(),
            }),
        }
    }

    /// Builds a validation session over `inputs` from a rules declaration:
    /// an object mapping `"path[:alias]"` to a rule spec (compact string or
    /// array of compact strings). The session is not yet run.
    pub fn make(&self, inputs: Value, rules: &Value) -> Result<Validation, ConfigError> {
        Validation::new(self.clone(), inputs, rules)
    }

    /// Convenience: build a session and run it immediately.
    pub fn validate(&self, inputs: Value, rules: &Value) -> Result<Validation, ConfigError> {
        let mut validation = self.make(inputs, rules)?;
        validation.validate();
        Ok(validation)
    }
}
