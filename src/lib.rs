//! Declarative rule validation for nested, dynamically-shaped data bags.
//!
//! `fieldbag` answers "is this input acceptable, and why not" for request
//! input, form submissions, and config payloads represented as
//! [`serde_json::Value`] trees, without hand-written conditionals:
//!
//! ```text
//! Validator::make(inputs, rules) → Validation → validate() → ErrorBag
//! ```
//!
//! Field paths use dot notation and may contain `*` wildcard segments that
//! expand against the data actually present; each field runs an ordered
//! rule pipeline with well-defined short-circuiting, and failures resolve
//! to human-readable messages with placeholder substitution and per-path
//! override precedence.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let inputs = json!({
//!     "email": "jo@example.com",
//!     "items": [{"qty": 1}, {"qty": -2}],
//! });
//! let rules = json!({
//!     "email": "required|email",
//!     "items.*.qty": "required|min:0",
//! });
//!
//! let validation = fieldbag::check(inputs, &rules).expect("rules resolve");
//! assert!(validation.fails());
//! assert_eq!(
//!     validation.errors().first("items.1.qty"),
//!     Some("The Qty must be at least 0"),
//! );
//! ```
//!
//! Custom rules implement the [`Rule`] trait and join the set through
//! [`Validator::register`].

pub mod attribute;
pub mod error;
pub mod error_bag;
pub mod path;
pub mod rule;
pub mod rules;
pub mod validation;
pub mod validator;

pub use attribute::Attribute;
pub use error::ConfigError;
pub use error_bag::{ErrorBag, ErrorEntry};
pub use rule::{CheckContext, Rule, RuleBinding};
pub use validation::Validation;
pub use validator::Validator;

use serde_json::Value;

/// Convenience entry point composing registry construction → `make` →
/// `validate` with the built-in rule set.
///
/// # Errors
///
/// Returns [`ConfigError`] when a rule name is unknown or a rule spec has
/// an invalid shape. Rule *failures* are not errors — inspect
/// [`Validation::fails`] and [`Validation::errors`] on the returned session.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let validation = fieldbag::check(
///     json!({"age": 16}),
///     &json!({"age": "required|min:18"}),
/// )
/// .expect("rules resolve");
///
/// assert!(validation.fails());
/// ```
pub fn check(inputs: Value, rules: &Value) -> Result<Validation, ConfigError> {
    Validator::default().validate(inputs, rules)
}
