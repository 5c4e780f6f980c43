//! The rule capability seam and its configured form.
//!
//! A [`Rule`] is a stateless predicate registered under a name; a
//! [`RuleBinding`] is that predicate plus the parameters one attribute
//! declaration configured it with. Bindings are parsed once at session
//! construction and never re-parsed per evaluation.

use crate::attribute::Attribute;
use serde_json::Value;
use std::sync::Arc;

/// Read-only view handed to every `check` call.
///
/// Cross-field rules (`same`, `different`) resolve sibling values through
/// `bag`; `others` carries the sibling attributes produced alongside this
/// one by wildcard expansion, minus the attribute under check.
pub struct CheckContext<'a> {
    pub bag: &'a Value,
    pub others: &'a [Attribute],
}

/// A named validation predicate.
///
/// Implementations must be pure and reentrant: the same instance is shared
/// across bindings via `Arc` and may be invoked once per concrete attribute
/// a wildcard expansion produces.
pub trait Rule: Send + Sync {
    /// Checks `value` against the predicate. `params` are the strings the
    /// declaration configured the binding with (`"min:3"` → `["3"]`).
    fn check(&self, value: Option<&Value>, params: &[String], ctx: &CheckContext<'_>) -> bool;

    /// Default message template, with `:name` placeholders.
    fn message(&self) -> &'static str;

    /// Implicit rules run even when the value is absent or empty, and their
    /// failure halts the attribute's remaining pipeline.
    fn is_implicit(&self) -> bool {
        false
    }

    /// Names for positional parameters, used to key message placeholders.
    /// `min` declares `["min"]` so its template can say `:min`.
    fn param_names(&self) -> &'static [&'static str] {
        &[]
    }
}

/// A rule plus the parameters one declaration bound it with.
#[derive(Clone)]
pub struct RuleBinding {
    name: String,
    parameters: Vec<String>,
    rule: Arc<dyn Rule>,
}

impl RuleBinding {
    pub fn new(name: impl Into<String>, parameters: Vec<String>, rule: Arc<dyn Rule>) -> Self {
        RuleBinding {
            name: name.into(),
            parameters,
            rule,
        }
    }

    /// The registry name this binding was resolved under.
    pub fn key(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn is_implicit(&self) -> bool {
        self.rule.is_implicit()
    }

    /// The rule's default message template.
    pub fn message(&self) -> &'static str {
        self.rule.message()
    }

    pub fn param_names(&self) -> &'static [&'static str] {
        self.rule.param_names()
    }

    pub fn check(&self, value: Option<&Value>, ctx: &CheckContext<'_>) -> bool {
        self.rule.check(value, &self.parameters, ctx)
    }
}

impl std::fmt::Debug for RuleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBinding")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Splits a compact rule spec into name and parameters.
///
/// `"between:1,10"` → `("between", ["1", "10"])`. Only the first `:` splits;
/// a regex parameter may itself contain colons and commas are split naively,
/// so `regex` patterns needing commas should be attached as pre-built
/// bindings instead.
pub fn parse_rule_spec(spec: &str) -> (&str, Vec<String>) {
    match spec.split_once(':') {
        Some((name, rest)) => (name, rest.split(',').map(str::to_string).collect()),
        None => (spec, Vec::new()),
    }
}
