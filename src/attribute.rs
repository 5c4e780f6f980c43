//! One validated field: a dot-path bound to an ordered rule pipeline.

use crate::rule::RuleBinding;

/// A field under validation.
///
/// The path may contain the `*` wildcard marker at any segment; such an
/// attribute is never evaluated directly, it is expanded into concrete
/// attributes against the data first.
#[derive(Clone, Debug)]
pub struct Attribute {
    path: String,
    alias: Option<String>,
    rules: Vec<RuleBinding>,
}

impl Attribute {
    pub fn new(path: impl Into<String>, alias: Option<String>, rules: Vec<RuleBinding>) -> Self {
        Attribute {
            path: path.into(),
            alias,
            rules,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Explicit display alias, if one was declared.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn rules(&self) -> &[RuleBinding] {
        &self.rules
    }

    /// True iff the path contains the wildcard marker.
    pub fn is_array_attribute(&self) -> bool {
        self.path.contains('*')
    }

    /// An attribute counts as required when any of its bindings is the
    /// `required` rule; non-implicit rules then run even on empty values.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|rule| rule.key() == "required")
    }

    /// Display name used in messages: the explicit alias when set, else the
    /// humanized path.
    pub fn display_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => humanize(&self.path),
        }
    }
}

/// Humanizes a dot-path for display: the last concrete segment (skipping
/// array indices and wildcards), underscores spaced, first letter upper.
/// `items.0.unit_price` → `Unit price`.
pub fn humanize(path: &str) -> String {
    let segment = path
        .split('.')
        .rev()
        .find(|seg| *seg != "*" && !seg.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(path);

    let spaced = segment.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
