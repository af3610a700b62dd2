//! Configuration for sanitization and logging.
//!
//! Everything has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! [sanitizer]
//! identifier_pattern = "^[A-Za-z_][A-Za-z0-9_$]*$"
//! max_identifier_len = 64
//! max_value_len = 4096
//! quote_policy = "escape"
//! forbidden_value_chars = ["\\"]
//!
//! [logging]
//! enabled = true
//! max_sql_length = 200
//! ```

use crate::error::{QbError, QbResult};
use serde::Deserialize;
use std::path::Path;

/// What to do with single quotes inside values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotePolicy {
    /// Double them (`'` -> `''`).
    #[default]
    Escape,
    /// Reject the value.
    Reject,
}

/// Settings for [`PolicySanitizer`](crate::sanitize::PolicySanitizer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Regex every table and column name must match.
    pub identifier_pattern: String,
    /// Maximum identifier length in bytes.
    pub max_identifier_len: usize,
    /// Maximum value length in bytes.
    pub max_value_len: usize,
    pub quote_policy: QuotePolicy,
    /// Characters that make a value unsafe outright.
    pub forbidden_value_chars: Vec<char>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            identifier_pattern: r"^[A-Za-z_][A-Za-z0-9_$]*$".to_string(),
            max_identifier_len: 64,
            max_value_len: 4096,
            quote_policy: QuotePolicy::Escape,
            forbidden_value_chars: vec!['\\'],
        }
    }
}

impl SanitizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.identifier_pattern = pattern.into();
        self
    }

    pub fn with_max_identifier_len(mut self, len: usize) -> Self {
        self.max_identifier_len = len;
        self
    }

    pub fn with_max_value_len(mut self, len: usize) -> Self {
        self.max_value_len = len;
        self
    }

    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    pub fn with_forbidden_value_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.forbidden_value_chars = chars.into_iter().collect();
        self
    }
}

/// Logging settings for built statements and rejected input.
///
/// Only takes effect with the `tracing` feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether events are emitted at all.
    pub enabled: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_sql_length: Some(200),
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Apply the truncation limit to `sql`.
    pub fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QbConfig {
    pub sanitizer: SanitizerConfig,
    pub logging: LogConfig,
}

impl QbConfig {
    /// Parse configuration from a TOML document.
    pub fn from_toml_str(raw: &str) -> QbResult<Self> {
        toml::from_str(raw).map_err(|e| QbError::config(format!("failed to parse config: {e}")))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> QbResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QbError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            QbError::Config(msg) => QbError::config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }
}
