//! Built-in rules.
//!
//! Every rule is a stateless unit struct; parameters arrive per-binding
//! through [`Rule::check`]. The emptiness predicate the whole pipeline
//! relies on lives here as [`is_present`], so the `required` rule and the
//! session's skip logic can never drift apart.

use crate::rule::{CheckContext, Rule};
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

// ─── Cached regexes ─────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+$").unwrap());

// ─── Emptiness ──────────────────────────────────────────────────────────────

/// Presence semantics shared by `required` and the pipeline's skip logic.
///
/// Absent entries and nulls are empty; so are whitespace-only strings and
/// empty containers. Numbers and booleans are always present, zero included.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => true,
    }
}

// ─── Measurement ────────────────────────────────────────────────────────────

/// The magnitude `min`/`max`/`between` compare against: the number itself
/// for numbers, character count for strings, element count for containers.
fn size_of(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        _ => None,
    }
}

/// Scalar string form used by `in`/`not_in` comparisons.
fn comparable(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn first_param_f64(params: &[String]) -> Option<f64> {
    params.first().and_then(|p| p.parse().ok())
}

// ─── Rules ──────────────────────────────────────────────────────────────────

/// `required` — implicit; fails on absent or empty values.
pub struct Required;

impl Rule for Required {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        is_present(value)
    }

    fn message(&self) -> &'static str {
        "The :attribute field is required"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// `email` — syntactic email check.
pub struct Email;

impl Rule for Email {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::String(s)) => EMAIL_RE.is_match(s),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute is not a valid email"
    }
}

/// `min:n` — numeric lower bound, or minimum length for strings and
/// containers.
pub struct Min;

impl Rule for Min {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match (size_of(value), first_param_f64(params)) {
            (Some(size), Some(min)) => size >= min,
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute must be at least :min"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["min"]
    }
}

/// `max:n` — numeric upper bound, or maximum length.
pub struct Max;

impl Rule for Max {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match (size_of(value), first_param_f64(params)) {
            (Some(size), Some(max)) => size <= max,
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute may not be greater than :max"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["max"]
    }
}

/// `between:lo,hi` — inclusive size bounds.
pub struct Between;

impl Rule for Between {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        let size = match size_of(value) {
            Some(s) => s,
            None => return false,
        };
        let (lo, hi) = match (params.first(), params.get(1)) {
            (Some(lo), Some(hi)) => match (lo.parse::<f64>(), hi.parse::<f64>()) {
                (Ok(lo), Ok(hi)) => (lo, hi),
                _ => return false,
            },
            _ => return false,
        };
        size >= lo && size <= hi
    }

    fn message(&self) -> &'static str {
        "The :attribute must be between :min and :max"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["min", "max"]
    }
}

/// `numeric` — a number, or a string parsing as one.
pub struct Numeric;

impl Rule for Numeric {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::Number(_)) => true,
            Some(Value::String(s)) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute must be numeric"
    }
}

/// `integer` — an integral number, or a string parsing as one.
pub struct Integer;

impl Rule for Integer {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::Number(n)) => n.is_i64() || n.is_u64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().is_ok(),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute must be an integer"
    }
}

/// `alpha` — non-empty string of letters only.
pub struct Alpha;

impl Rule for Alpha {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::String(s)) => !s.is_empty() && s.chars().all(char::is_alphabetic),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute may only contain letters"
    }
}

/// `alpha_num` — non-empty string of letters and digits.
pub struct AlphaNum;

impl Rule for AlphaNum {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::String(s)) => !s.is_empty() && s.chars().all(char::is_alphanumeric),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute may only contain letters and numbers"
    }
}

/// `in:a,b,c` — scalar value must equal one of the parameters.
pub struct In;

impl Rule for In {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match comparable(value) {
            Some(v) => params.iter().any(|p| *p == v),
            None => false,
        }
    }

    fn message(&self) -> &'static str {
        "The selected :attribute is invalid"
    }
}

/// `not_in:a,b,c` — scalar value must equal none of the parameters.
pub struct NotIn;

impl Rule for NotIn {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match comparable(value) {
            Some(v) => params.iter().all(|p| *p != v),
            None => false,
        }
    }

    fn message(&self) -> &'static str {
        "The selected :attribute is invalid"
    }
}

/// `same:other` — must equal the value at the `other` dot-path. Absent
/// values compare as null.
pub struct Same;

impl Rule for Same {
    fn check(&self, value: Option<&Value>, params: &[String], ctx: &CheckContext<'_>) -> bool {
        let other_path = match params.first() {
            Some(p) => p,
            None => return false,
        };
        let other = crate::path::get(ctx.bag, other_path);
        value.unwrap_or(&Value::Null) == other.unwrap_or(&Value::Null)
    }

    fn message(&self) -> &'static str {
        "The :attribute must match :other"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["other"]
    }
}

/// `different:other` — must not equal the value at the `other` dot-path.
pub struct Different;

impl Rule for Different {
    fn check(&self, value: Option<&Value>, params: &[String], ctx: &CheckContext<'_>) -> bool {
        let other_path = match params.first() {
            Some(p) => p,
            None => return false,
        };
        let other = crate::path::get(ctx.bag, other_path);
        value.unwrap_or(&Value::Null) != other.unwrap_or(&Value::Null)
    }

    fn message(&self) -> &'static str {
        "The :attribute must differ from :other"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["other"]
    }
}

/// `regex:pattern` — string must match the parameter pattern. An invalid
/// pattern fails the rule rather than erroring.
pub struct RegexRule;

impl Rule for RegexRule {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        let (pattern, text) = match (params.first(), value) {
            (Some(p), Some(Value::String(s))) => (p, s),
            _ => return false,
        };
        match Regex::new(pattern) {
            Ok(re) => re.is_match(text),
            Err(_) => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute format is invalid"
    }
}

/// `url` — scheme-qualified URL string.
pub struct Url;

impl Rule for Url {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::String(s)) => URL_RE.is_match(s),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute is not a valid URL"
    }
}

/// `accepted` — implicit; for consent checkboxes and the like. Accepts
/// `true`, `1`, `"1"`, `"true"`, `"yes"`, `"on"`.
pub struct Accepted;

impl Rule for Accepted {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "true" | "yes" | "on"),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute must be accepted"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// `array` — a sequence or mapping value.
pub struct IsArray;

impl Rule for IsArray {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        matches!(value, Some(Value::Array(_)) | Some(Value::Object(_)))
    }

    fn message(&self) -> &'static str {
        "The :attribute must be an array"
    }
}

/// `boolean` — a boolean, or one of `0`, `1`, `"0"`, `"1"`, `"true"`,
/// `"false"`.
pub struct Boolean;

impl Rule for Boolean {
    fn check(&self, value: Option<&Value>, _params: &[String], _ctx: &CheckContext<'_>) -> bool {
        match value {
            Some(Value::Bool(_)) => true,
            Some(Value::Number(n)) => matches!(n.as_i64(), Some(0) | Some(1)),
            Some(Value::String(s)) => matches!(s.as_str(), "0" | "1" | "true" | "false"),
            _ => false,
        }
    }

    fn message(&self) -> &'static str {
        "The :attribute must be true or false"
    }
}

/// `digits:n` — exactly `n` ASCII digits, given as string or number.
pub struct Digits;

impl Rule for Digits {
    fn check(&self, value: Option<&Value>, params: &[String], _ctx: &CheckContext<'_>) -> bool {
        let expected: usize = match params.first().and_then(|p| p.parse().ok()) {
            Some(n) => n,
            None => return false,
        };
        let digits = match value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return false,
        };
        digits.len() == expected && digits.bytes().all(|b| b.is_ascii_digit())
    }

    fn message(&self) -> &'static str {
        "The :attribute must be :digits digits"
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["digits"]
    }
}

// ─── Registry seed ──────────────────────────────────────────────────────────

/// The rule set a default registry starts with.
pub(crate) fn builtins() -> Vec<(&'static str, Arc<dyn Rule>)> {
    vec![
        ("required", Arc::new(Required) as Arc<dyn Rule>),
        ("email", Arc::new(Email)),
        ("min", Arc::new(Min)),
        ("max", Arc::new(Max)),
        ("between", Arc::new(Between)),
        ("numeric", Arc::new(Numeric)),
        ("integer", Arc::new(Integer)),
        ("alpha", Arc::new(Alpha)),
        ("alpha_num", Arc::new(AlphaNum)),
        ("in", Arc::new(In)),
        ("not_in", Arc::new(NotIn)),
        ("same", Arc::new(Same)),
        ("different", Arc::new(Different)),
        ("regex", Arc::new(RegexRule)),
        ("url", Arc::new(Url)),
        ("accepted", Arc::new(Accepted)),
        ("array", Arc::new(IsArray)),
        ("boolean", Arc::new(Boolean)),
        ("digits", Arc::new(Digits)),
    ]
}
