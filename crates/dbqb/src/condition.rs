//! Leaf predicates for `where` clauses.
//!
//! This module provides [`Conjunction`], [`Operator`] and [`Condition`], the
//! single `field <op> 'value'` predicate. Parenthesised groups of conditions
//! live in [`crate::expr`].
//!
//! # Example
//! ```
//! use dbqb::{Condition, Conjunction, Operator};
//!
//! let adult = Condition::new(Conjunction::And, "age", Operator::GreaterOrEqual, false, "18");
//! assert_eq!(adult.serialize(false), "`age`>='18'");
//! assert_eq!(adult.serialize(true), "and `age`>='18'");
//! ```

use crate::error::{QbError, QbResult};
use crate::ident::{write_ident, write_literal};
use crate::sanitize::InputKind;
use std::fmt;
use std::str::FromStr;

/// How a predicate binds to the predicate before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    /// Keyword form: `"and"` / `"or"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conjunction {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "&&" => Ok(Conjunction::And),
            "or" | "||" => Ok(Conjunction::Or),
            _ => Err(QbError::UnknownConjunction(s.to_string())),
        }
    }
}

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
    /// `regexp` (meant for select statements, not enforced)
    Regex,
}

impl Operator {
    /// SQL token for the operator.
    pub fn token(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Regex => "regexp",
        }
    }

    /// Keyword operators are separated from their operands by spaces.
    fn is_keyword(self) -> bool {
        matches!(self, Operator::Regex)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Operator {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "eq" => Ok(Operator::Equal),
            "<" | "lt" => Ok(Operator::Less),
            ">" | "gt" => Ok(Operator::Greater),
            "<=" | "le" | "lte" => Ok(Operator::LessOrEqual),
            ">=" | "ge" | "gte" => Ok(Operator::GreaterOrEqual),
            "regexp" | "regex" => Ok(Operator::Regex),
            _ => Err(QbError::UnknownOperator(s.to_string())),
        }
    }
}

/// A single predicate: `[not] field <op> 'value'`, tagged with the
/// conjunction that joins it to the preceding predicate.
///
/// Conditions are immutable once built. Serialization never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    conjunction: Conjunction,
    field: String,
    operator: Operator,
    negate: bool,
    value: String,
}

impl Condition {
    /// Create a new condition.
    pub fn new(
        conjunction: Conjunction,
        field: impl Into<String>,
        operator: Operator,
        negate: bool,
        value: impl Into<String>,
    ) -> Self {
        Self {
            conjunction,
            field: field.into(),
            operator,
            negate,
            value: value.into(),
        }
    }

    /// Create a condition from textual conjunction and operator names.
    ///
    /// Fails with `UnknownConjunction` / `UnknownOperator` for unrecognised
    /// text, so an invalid condition can never exist.
    pub fn parse(
        conjunction: &str,
        field: impl Into<String>,
        operator: &str,
        negate: bool,
        value: impl Into<String>,
    ) -> QbResult<Self> {
        let conjunction: Conjunction = conjunction.parse()?;
        let operator: Operator = operator.parse()?;
        Ok(Self::new(conjunction, field, operator, negate, value))
    }

    // ==================== Convenience constructors ====================

    /// Create a condition joined with `and`.
    pub fn and(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::new(Conjunction::And, field, operator, false, value)
    }

    /// Create a condition joined with `or`.
    pub fn or(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::new(Conjunction::Or, field, operator, false, value)
    }

    /// Return this condition with negation switched on.
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    // ==================== Accessors ====================

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The conjunction this predicate binds with.
    pub fn leading_conjunction(&self) -> Conjunction {
        self.conjunction
    }

    /// Rebuild the condition with its field and value passed through `f`.
    ///
    /// Used by the builder to route text through the sanitizer; the receiver
    /// condition is left untouched when `f` fails.
    pub(crate) fn try_map_text<F>(&self, f: &mut F) -> QbResult<Self>
    where
        F: FnMut(&str, InputKind) -> QbResult<String>,
    {
        let field = f(&self.field, InputKind::Column)?;
        let value = f(&self.value, InputKind::Value)?;
        Ok(Self {
            field,
            value,
            ..self.clone()
        })
    }

    /// Render the predicate.
    ///
    /// With `include_leading_conjunction` the conjunction keyword and a space
    /// come first; without it the output starts at the negation marker or the
    /// field.
    pub fn serialize(&self, include_leading_conjunction: bool) -> String {
        let mut out = String::with_capacity(self.field.len() + self.value.len() + 16);
        self.write_sql(&mut out, include_leading_conjunction);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, include_leading_conjunction: bool) {
        if include_leading_conjunction {
            out.push_str(self.conjunction.as_str());
            out.push(' ');
        }
        if self.negate {
            out.push_str("not ");
        }
        write_ident(out, &self.field);
        if self.operator.is_keyword() {
            out.push(' ');
            out.push_str(self.operator.token());
            out.push(' ');
        } else {
            out.push_str(self.operator.token());
        }
        write_literal(out, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_tokens() {
        let cases = [
            (Operator::Equal, "`a`='1'"),
            (Operator::Less, "`a`<'1'"),
            (Operator::Greater, "`a`>'1'"),
            (Operator::LessOrEqual, "`a`<='1'"),
            (Operator::GreaterOrEqual, "`a`>='1'"),
            (Operator::Regex, "`a` regexp '1'"),
        ];
        for (op, expected) in cases {
            assert_eq!(Condition::and("a", op, "1").serialize(false), expected);
        }
    }

    #[test]
    fn leading_conjunction_rendered_on_request() {
        let c = Condition::or("name", Operator::Equal, "amy");
        assert_eq!(c.serialize(true), "or `name`='amy'");
        assert_eq!(c.serialize(false), "`name`='amy'");
        assert_eq!(c.leading_conjunction(), Conjunction::Or);
    }

    #[test]
    fn negation_precedes_field() {
        let c = Condition::new(Conjunction::And, "clientId", Operator::GreaterOrEqual, true, "1");
        assert_eq!(c.serialize(false), "not `clientId`>='1'");
        assert_eq!(c.serialize(true), "and not `clientId`>='1'");
    }

    #[test]
    fn negated_regex() {
        let c = Condition::and("name", Operator::Regex, "^a.*").negated();
        assert_eq!(c.serialize(false), "not `name` regexp '^a.*'");
    }

    #[test]
    fn parse_accepts_tokens_and_names() {
        let c = Condition::parse("OR", "age", ">=", false, "18").unwrap();
        assert_eq!(c.conjunction(), Conjunction::Or);
        assert_eq!(c.operator(), Operator::GreaterOrEqual);

        let c = Condition::parse("&&", "name", "regex", false, "x").unwrap();
        assert_eq!(c.conjunction(), Conjunction::And);
        assert_eq!(c.operator(), Operator::Regex);
    }

    #[test]
    fn parse_rejects_unknown_conjunction() {
        let err = Condition::parse("xor", "a", "=", false, "1").unwrap_err();
        assert_eq!(err, QbError::UnknownConjunction("xor".to_string()));
    }

    #[test]
    fn parse_rejects_unknown_operator() {
        let err = Condition::parse("and", "a", "!=", false, "1").unwrap_err();
        assert_eq!(err, QbError::UnknownOperator("!=".to_string()));
    }

    #[test]
    fn try_map_text_routes_field_and_value() {
        let c = Condition::and("a", Operator::Equal, "b");
        let mapped = c
            .try_map_text(&mut |s, kind| {
                Ok(match kind {
                    InputKind::Value => format!("{s}!"),
                    _ => s.to_uppercase(),
                })
            })
            .unwrap();
        assert_eq!(mapped.field(), "A");
        assert_eq!(mapped.value(), "b!");
        assert_eq!(c.field(), "a");
    }
}
