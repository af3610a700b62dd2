//! Statement actions and ordering directions.

use crate::error::{QbError, QbResult};
use std::fmt;
use std::str::FromStr;

/// The CRUD action a statement performs.
///
/// `None` is the unset state of a fresh builder; a statement cannot be built
/// until a real action replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// INSERT statement
    Insert,
    /// SELECT query
    Select,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// No action chosen yet
    #[default]
    None,
}

impl Action {
    /// Keyword form of the action (`"select"`, ...), `"none"` for the sentinel.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Insert => "insert",
            Action::Select => "select",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::None => "none",
        }
    }

    /// Whether a real action has been chosen.
    pub fn is_set(self) -> bool {
        self != Action::None
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        let trimmed = s.trim();
        [Action::Insert, Action::Select, Action::Update, Action::Delete]
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| QbError::UnknownAction(s.to_string()))
    }
}

/// Direction of an `order by` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Ascending),
            "desc" | "descending" => Ok(Order::Descending),
            _ => Err(QbError::UnknownOrder(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_default_is_unset() {
        assert_eq!(Action::default(), Action::None);
        assert!(!Action::default().is_set());
    }

    #[test]
    fn action_parse_is_case_insensitive() {
        assert_eq!("SELECT".parse::<Action>().unwrap(), Action::Select);
        assert_eq!(" delete ".parse::<Action>().unwrap(), Action::Delete);
    }

    #[test]
    fn action_parse_rejects_sentinel_and_junk() {
        assert_eq!(
            "none".parse::<Action>(),
            Err(QbError::UnknownAction("none".to_string()))
        );
        assert!(matches!("upsert".parse::<Action>(), Err(QbError::UnknownAction(_))));
    }

    #[test]
    fn order_parse() {
        assert_eq!("DESC".parse::<Order>().unwrap(), Order::Descending);
        assert_eq!("ascending".parse::<Order>().unwrap(), Order::Ascending);
        assert!(matches!("up".parse::<Order>(), Err(QbError::UnknownOrder(_))));
    }
}
