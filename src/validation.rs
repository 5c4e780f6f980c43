//! The validation session: owns the input bag, the attribute set, message
//! overrides and aliases, and runs the expand-then-evaluate pipeline.

use crate::attribute::{Attribute, humanize};
use crate::error::{ConfigError, json_type_name};
use crate::error_bag::ErrorBag;
use crate::path;
use crate::rule::{CheckContext, RuleBinding, parse_rule_spec};
use crate::rules::is_present;
use crate::validator::Validator;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One validation run over one input bag.
///
/// Built by [`Validator::make`]. The error bag is rebuilt from scratch on
/// every [`validate`](Validation::validate) call; results never accumulate
/// across calls.
#[derive(Debug)]
pub struct Validation {
    validator: Validator,
    inputs: Value,
    attributes: Vec<Attribute>,
    aliases: HashMap<String, String>,
    messages: HashMap<String, String>,
    errors: ErrorBag,
}

impl Validation {
    pub(crate) fn new(
        validator: Validator,
        inputs: Value,
        rules: &Value,
    ) -> Result<Validation, ConfigError> {
        let mut validation = Validation {
            validator,
            inputs: Value::Object(Map::new()),
            attributes: Vec::new(),
            aliases: HashMap::new(),
            messages: HashMap::new(),
            errors: ErrorBag::new(),
        };

        validation.inputs = validation.resolve_input_attributes(inputs);

        if let Some(rules) = rules.as_object() {
            for (key, spec) in rules {
                let (path, alias) = split_alias_key(key);
                if let Some(alias) = alias {
                    validation.aliases.insert(path.to_string(), alias.to_string());
                }
                validation.add_attribute(path, spec)?;
            }
        }

        Ok(validation)
    }

    // ─── Construction / mutation ────────────────────────────────────────────

    /// Registers an attribute from a rule spec value: either a pipe-delimited
    /// compact string (`"required|min:3"`) or an array of compact strings.
    /// Any other shape is a configuration error naming the offending type.
    pub fn add_attribute(&mut self, path: &str, spec: &Value) -> Result<(), ConfigError> {
        let bindings = self.resolve_rules(path, spec)?;
        self.add_attribute_bindings(path, bindings);
        Ok(())
    }

    /// Registers an attribute from pre-built bindings, bypassing spec
    /// parsing.
    pub fn add_attribute_bindings(&mut self, path: &str, bindings: Vec<RuleBinding>) {
        let alias = self.aliases.get(path).cloned();
        self.attributes
            .push(Attribute::new(path, alias, bindings));
    }

    fn resolve_rules(&self, path: &str, spec: &Value) -> Result<Vec<RuleBinding>, ConfigError> {
        let specs: Vec<&str> = match spec {
            Value::String(compact) => compact.split('|').filter(|s| !s.is_empty()).collect(),
            Value::Array(items) => {
                let mut specs = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) if !s.is_empty() => specs.push(s.as_str()),
                        Value::String(_) => {}
                        other => {
                            return Err(ConfigError::InvalidRuleSpec {
                                path: path.to_string(),
                                found: json_type_name(other).to_string(),
                            });
                        }
                    }
                }
                specs
            }
            other => {
                return Err(ConfigError::InvalidRuleSpec {
                    path: path.to_string(),
                    found: json_type_name(other).to_string(),
                });
            }
        };

        let mut bindings = Vec::with_capacity(specs.len());
        for spec in specs {
            let (name, params) = parse_rule_spec(spec);
            bindings.push(self.validator.resolve(name, params)?);
        }
        Ok(bindings)
    }

    /// Splits compound `"key:alias"` input keys, recording aliases, and
    /// returns the bag keyed by storage key only.
    fn resolve_input_attributes(&mut self, inputs: Value) -> Value {
        match inputs {
            Value::Object(map) => {
                let mut resolved = Map::new();
                for (key, value) in map {
                    let (storage, alias) = split_alias_key(&key);
                    if let Some(alias) = alias {
                        self.aliases.insert(storage.to_string(), alias.to_string());
                    }
                    resolved.insert(storage.to_string(), value);
                }
                Value::Object(resolved)
            }
            other => other,
        }
    }

    pub fn set_alias(&mut self, path: impl Into<String>, alias: impl Into<String>) {
        self.aliases.insert(path.into(), alias.into());
    }

    pub fn set_aliases(&mut self, aliases: impl IntoIterator<Item = (String, String)>) {
        self.aliases.extend(aliases);
    }

    /// Overrides a message template. Keys: `"path.rule"`, `"path.*"`, or
    /// `"rule"`, in descending precedence at resolution time.
    pub fn set_message(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }

    pub fn set_messages(&mut self, messages: impl IntoIterator<Item = (String, String)>) {
        self.messages.extend(messages);
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fails(&self) -> bool {
        !self.passes()
    }

    pub fn get_value(&self, path: &str) -> Option<&Value> {
        path::get(&self.inputs, path)
    }

    pub fn has_value(&self, path: &str) -> bool {
        path::has(&self.inputs, path)
    }

    /// The attribute registered under `path` (the declared path, not an
    /// expanded one), if any.
    pub fn get_attribute(&self, path: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.path() == path)
    }

    // ─── Orchestration ──────────────────────────────────────────────────────

    /// Runs every registered attribute's pipeline against the current bag.
    pub fn validate(&mut self) {
        self.validate_with(Value::Object(Map::new()));
    }

    /// Merges `extra` into the input bag (same compound-key parsing as
    /// construction), then validates.
    pub fn validate_with(&mut self, extra: Value) {
        let extra = self.resolve_input_attributes(extra);
        if let (Some(bag), Some(extra)) = (self.inputs.as_object_mut(), extra.as_object()) {
            for (key, value) in extra {
                bag.insert(key.clone(), value.clone());
            }
        }

        self.errors = ErrorBag::new();

        let attributes = self.attributes.clone();
        for attribute in &attributes {
            if attribute.is_array_attribute() {
                // Expansion recurses exactly one level: a concrete attribute
                // is never itself an array attribute.
                let expanded = self.expand_attribute(attribute);
                for (i, concrete) in expanded.iter().enumerate() {
                    let mut others = expanded.clone();
                    others.remove(i);
                    self.validate_attribute(concrete, &others);
                }
            } else {
                self.validate_attribute(attribute, &[]);
            }
        }
    }

    /// Expands a wildcard attribute into concrete attributes, one per path
    /// present in the data. Aliases are re-derived per concrete path.
    fn expand_attribute(&self, attribute: &Attribute) -> Vec<Attribute> {
        path::expand_wildcard_path(&self.inputs, attribute.path())
            .into_iter()
            .map(|p| Attribute::new(p, None, attribute.rules().to_vec()))
            .collect()
    }

    fn validate_attribute(&mut self, attribute: &Attribute, others: &[Attribute]) {
        let value = path::get(&self.inputs, attribute.path()).cloned();
        let value = value.as_ref();
        let is_empty = !is_present(value);

        for binding in attribute.rules() {
            if is_empty && rule_is_optional(attribute, binding) {
                continue;
            }

            let valid = {
                let ctx = CheckContext {
                    bag: &self.inputs,
                    others,
                };
                binding.check(value, &ctx)
            };

            if !valid {
                let message = self.resolve_message(attribute, value, binding);
                self.errors.add(attribute.path(), binding.key(), message);

                // Downstream rules assume presence once an implicit rule has
                // rejected the value.
                if binding.is_implicit() {
                    break;
                }
            }
        }
    }

    // ─── Message resolution ─────────────────────────────────────────────────

    fn resolve_message(
        &self,
        attribute: &Attribute,
        value: Option<&Value>,
        binding: &RuleBinding,
    ) -> String {
        let path = attribute.path();
        let rule = binding.key();

        let template = [
            format!("{}.{}", path, rule),
            format!("{}.*", path),
            rule.to_string(),
        ]
        .iter()
        .find_map(|key| self.messages.get(key))
        .map(String::as_str)
        .unwrap_or_else(|| binding.message());

        let mut vars: Vec<(String, String)> = binding
            .param_names()
            .iter()
            .zip(binding.parameters())
            .map(|(name, param)| (name.to_string(), param.clone()))
            .collect();
        vars.push(("attribute".to_string(), self.display_name(attribute)));
        vars.push((
            "value".to_string(),
            value.map(stringify).unwrap_or_default(),
        ));

        substitute(template, &vars)
    }

    fn display_name(&self, attribute: &Attribute) -> String {
        if let Some(alias) = attribute.alias() {
            return alias.to_string();
        }
        if let Some(alias) = self.aliases.get(attribute.path()) {
            return alias.clone();
        }
        humanize(attribute.path())
    }
}

/// Skip a binding on empty values unless something insists it runs: the
/// attribute itself being required, the rule being implicit, or the rule
/// being `required`.
fn rule_is_optional(attribute: &Attribute, binding: &RuleBinding) -> bool {
    !attribute.is_required() && !binding.is_implicit() && binding.key() != "required"
}

fn split_alias_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(':') {
        Some((storage, alias)) => (storage, Some(alias)),
        None => (key, None),
    }
}

/// Message-variable rendering: strings and numbers verbatim, structured
/// values as canonical JSON, everything else empty.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Replaces every `:name` occurrence in one linear pass; substituted text is
/// never re-scanned. Longest variable name wins at each `:`.
fn substitute(template: &str, vars: &[(String, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let hit = vars
            .iter()
            .filter(|(name, _)| after.starts_with(name.as_str()))
            .max_by_key(|(name, _)| name.len());
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len()..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
