//! Input sanitization.
//!
//! Every table name, column name and value the builder stores goes through a
//! [`Sanitizer`] first. Statements inline values as quoted literals, so this
//! is the only barrier against injection. The builder itself is agnostic to
//! the policy: it only consumes the pass/fail contract.
//!
//! Two implementations ship with the crate:
//!
//! - [`NoopSanitizer`]: returns input unchanged. For trusted, hard-coded input.
//! - [`PolicySanitizer`]: pattern/length checks for identifiers and
//!   quote handling for values, configured by [`SanitizerConfig`].
//!
//! Closures can be used via [`sanitize_fn`].

use crate::config::{QuotePolicy, SanitizerConfig};
use crate::error::{QbError, QbResult};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// What a piece of untrusted text is about to become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Table name
    Table,
    /// Column / field name
    Column,
    /// Literal value
    Value,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Table => "table",
            InputKind::Column => "column",
            InputKind::Value => "value",
        }
    }

    /// Tables and columns are identifiers; values are literals.
    pub fn is_identifier(self) -> bool {
        matches!(self, InputKind::Table | InputKind::Column)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns raw text into text safe to interpolate, or rejects it.
pub trait Sanitizer {
    /// Return the safe form of `raw`, or fail with [`QbError::UnsafeInput`].
    fn sanitize(&self, raw: &str, kind: InputKind) -> QbResult<String>;
}

impl<S: Sanitizer + ?Sized> Sanitizer for &S {
    fn sanitize(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        (**self).sanitize(raw, kind)
    }
}

impl<S: Sanitizer + ?Sized> Sanitizer for Box<S> {
    fn sanitize(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        (**self).sanitize(raw, kind)
    }
}

impl<S: Sanitizer + ?Sized> Sanitizer for Arc<S> {
    fn sanitize(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        (**self).sanitize(raw, kind)
    }
}

/// Pass-through sanitizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSanitizer;

impl Sanitizer for NoopSanitizer {
    fn sanitize(&self, raw: &str, _kind: InputKind) -> QbResult<String> {
        Ok(raw.to_string())
    }
}

/// Sanitizer backed by a closure.
#[derive(Clone, Copy)]
pub struct FnSanitizer<F>(F);

impl<F> fmt::Debug for FnSanitizer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnSanitizer").field(&"<fn>").finish()
    }
}

impl<F> Sanitizer for FnSanitizer<F>
where
    F: Fn(&str, InputKind) -> QbResult<String>,
{
    fn sanitize(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        (self.0)(raw, kind)
    }
}

/// Wrap a closure as a [`Sanitizer`].
///
/// # Example
/// ```
/// use dbqb::sanitize::{sanitize_fn, InputKind, Sanitizer};
/// use dbqb::QbError;
///
/// let no_semicolons = sanitize_fn(|raw: &str, kind: InputKind| {
///     if raw.contains(';') {
///         Err(QbError::unsafe_input(kind, raw, "semicolon"))
///     } else {
///         Ok(raw.to_string())
///     }
/// });
/// assert!(no_semicolons.sanitize("a;b", InputKind::Value).is_err());
/// ```
pub fn sanitize_fn<F>(f: F) -> FnSanitizer<F>
where
    F: Fn(&str, InputKind) -> QbResult<String>,
{
    FnSanitizer(f)
}

/// Configurable allow-list sanitizer.
///
/// - Identifiers must be non-empty, no longer than `max_identifier_len` bytes
///   and match `identifier_pattern`. Backticks and NUL are rejected whatever
///   the pattern says.
/// - Values must be no longer than `max_value_len` bytes and contain neither
///   NUL nor any forbidden character. Backslashes are doubled; single quotes
///   are doubled or rejected according to the quote policy.
#[derive(Debug, Clone)]
pub struct PolicySanitizer {
    identifier: Regex,
    max_identifier_len: usize,
    max_value_len: usize,
    quote_policy: QuotePolicy,
    forbidden_value_chars: Vec<char>,
}

impl PolicySanitizer {
    /// Build a sanitizer from configuration.
    ///
    /// Fails with `Config` if the identifier pattern is not a valid regex.
    pub fn new(config: &SanitizerConfig) -> QbResult<Self> {
        let identifier = Regex::new(&config.identifier_pattern).map_err(|e| {
            QbError::config(format!(
                "invalid identifier_pattern {:?}: {e}",
                config.identifier_pattern
            ))
        })?;
        Ok(Self {
            identifier,
            max_identifier_len: config.max_identifier_len,
            max_value_len: config.max_value_len,
            quote_policy: config.quote_policy,
            forbidden_value_chars: config.forbidden_value_chars.clone(),
        })
    }

    fn check_identifier(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        if raw.is_empty() {
            return Err(QbError::unsafe_input(kind, raw, "identifier cannot be empty"));
        }
        if raw.len() > self.max_identifier_len {
            return Err(QbError::unsafe_input(
                kind,
                raw,
                format!("identifier longer than {} bytes", self.max_identifier_len),
            ));
        }
        if raw.contains(['`', '\0']) {
            return Err(QbError::unsafe_input(
                kind,
                raw,
                "identifier contains a backtick or NUL character",
            ));
        }
        if !self.identifier.is_match(raw) {
            return Err(QbError::unsafe_input(
                kind,
                raw,
                format!("identifier does not match {}", self.identifier.as_str()),
            ));
        }
        Ok(raw.to_string())
    }

    fn check_value(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        if raw.len() > self.max_value_len {
            return Err(QbError::unsafe_input(
                kind,
                raw,
                format!("value longer than {} bytes", self.max_value_len),
            ));
        }
        if raw.contains('\0') {
            return Err(QbError::unsafe_input(
                kind,
                raw,
                "value contains NUL character",
            ));
        }
        if let Some(c) = raw.chars().find(|c| self.forbidden_value_chars.contains(c)) {
            return Err(QbError::unsafe_input(
                kind,
                raw,
                format!("value contains forbidden character {c:?}"),
            ));
        }
        // `\` is an escape character inside MySQL literals.
        let escaped = raw.replace('\\', "\\\\");
        match self.quote_policy {
            QuotePolicy::Escape => Ok(escaped.replace('\'', "''")),
            QuotePolicy::Reject if raw.contains('\'') => {
                Err(QbError::unsafe_input(kind, raw, "value contains a single quote"))
            }
            QuotePolicy::Reject => Ok(escaped),
        }
    }
}

impl Sanitizer for PolicySanitizer {
    fn sanitize(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        if kind.is_identifier() {
            self.check_identifier(raw, kind)
        } else {
            self.check_value(raw, kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PolicySanitizer {
        PolicySanitizer::new(&SanitizerConfig::default()).unwrap()
    }

    #[test]
    fn noop_returns_input() {
        assert_eq!(NoopSanitizer.sanitize("a'b", InputKind::Value).unwrap(), "a'b");
    }

    #[test]
    fn policy_accepts_plain_identifiers() {
        let s = policy();
        assert_eq!(s.sanitize("Users", InputKind::Table).unwrap(), "Users");
        assert_eq!(s.sanitize("client_id$1", InputKind::Column).unwrap(), "client_id$1");
    }

    #[test]
    fn policy_rejects_bad_identifiers() {
        let s = policy();
        for raw in ["", "1table", "my table", "a`b", "users; drop table x"] {
            let err = s.sanitize(raw, InputKind::Column).unwrap_err();
            assert!(err.is_unsafe_input(), "{raw:?}");
        }
        let long = "a".repeat(65);
        assert!(s.sanitize(&long, InputKind::Table).is_err());
    }

    #[test]
    fn policy_escapes_quotes_by_default() {
        let s = policy();
        assert_eq!(s.sanitize("O'Brien", InputKind::Value).unwrap(), "O''Brien");
        assert_eq!(s.sanitize("", InputKind::Value).unwrap(), "");
    }

    #[test]
    fn policy_rejects_quotes_when_configured() {
        let cfg = SanitizerConfig::default().with_quote_policy(QuotePolicy::Reject);
        let s = PolicySanitizer::new(&cfg).unwrap();
        let err = s.sanitize("O'Brien", InputKind::Value).unwrap_err();
        assert_eq!(err.code(), 9);
        assert_eq!(s.sanitize("Amy", InputKind::Value).unwrap(), "Amy");
    }

    #[test]
    fn policy_rejects_forbidden_value_chars() {
        let s = policy();
        assert!(s.sanitize("a\\' or 1=1", InputKind::Value).is_err());
        assert!(s.sanitize("nul\0byte", InputKind::Value).is_err());
    }

    #[test]
    fn backslashes_are_doubled_when_not_forbidden() {
        let cfg = SanitizerConfig::default().with_forbidden_value_chars([';']);
        let s = PolicySanitizer::new(&cfg).unwrap();
        assert_eq!(
            s.sanitize("\\' or 1=1 -- ", InputKind::Value).unwrap(),
            "\\\\'' or 1=1 -- "
        );
        assert_eq!(s.sanitize("C:\\tmp\\", InputKind::Value).unwrap(), "C:\\\\tmp\\\\");

        let cfg = cfg.with_quote_policy(QuotePolicy::Reject);
        let s = PolicySanitizer::new(&cfg).unwrap();
        assert_eq!(s.sanitize("ends\\", InputKind::Value).unwrap(), "ends\\\\");
    }

    #[test]
    fn backticks_rejected_even_with_unanchored_pattern() {
        let cfg = SanitizerConfig::default().with_identifier_pattern("[a-z]+");
        let s = PolicySanitizer::new(&cfg).unwrap();
        assert_eq!(s.sanitize("users", InputKind::Table).unwrap(), "users");
        for raw in ["users` where 1=1 -- ", "a`b", "nul\0name"] {
            let err = s.sanitize(raw, InputKind::Table).unwrap_err();
            assert!(err.is_unsafe_input(), "{raw:?}");
        }
    }

    #[test]
    fn policy_rejects_oversized_values() {
        let s = PolicySanitizer::new(&SanitizerConfig::default().with_max_value_len(4)).unwrap();
        assert!(s.sanitize("abcd", InputKind::Value).is_ok());
        assert!(s.sanitize("abcde", InputKind::Value).is_err());
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let cfg = SanitizerConfig::default().with_identifier_pattern("([a-z");
        let err = PolicySanitizer::new(&cfg).unwrap_err();
        assert!(matches!(err, QbError::Config(_)));
    }

    #[test]
    fn shared_and_boxed_sanitizers() {
        let shared: Arc<dyn Sanitizer> = Arc::new(NoopSanitizer);
        let boxed: Box<dyn Sanitizer> = Box::new(policy());
        assert_eq!(shared.sanitize("x", InputKind::Value).unwrap(), "x");
        assert!(boxed.sanitize("x y", InputKind::Column).is_err());
        assert_eq!((&boxed).sanitize("it's", InputKind::Value).unwrap(), "it''s");
    }
}
