//! Accumulated state of one in-progress statement.

use super::main_clause::build_main_clause;
use crate::action::{Action, Order};
use crate::error::{QbError, QbResult};
use crate::expr::FilterExpr;
use crate::ident::write_ident;
use crate::rules::applicability;

/// Field/value bindings for INSERT and UPDATE.
///
/// Keeps insertion order. Setting an existing field replaces its value in
/// place, so a field is never emitted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    entries: Vec<(String, String)>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or replace the value of `field`.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }
}

impl<F: Into<String>, V: Into<String>> FromIterator<(F, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut fv = FieldValues::new();
        for (f, v) in iter {
            fv.set(f, v);
        }
        fv
    }
}

/// `order by` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Order,
}

/// Everything set on a builder so far.
///
/// Mutated only through [`StatementBuilder`](super::StatementBuilder), whose
/// setters sanitize before storing anything here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDescriptor {
    pub(crate) action: Action,
    pub(crate) table: String,
    pub(crate) columns: Vec<String>,
    pub(crate) field_values: FieldValues,
    pub(crate) filter: FilterExpr,
    pub(crate) order: Option<OrderBy>,
    pub(crate) limit: Option<u64>,
}

impl StatementDescriptor {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn field_values(&self) -> &FieldValues {
        &self.field_values
    }

    pub fn filter(&self) -> &FilterExpr {
        &self.filter
    }

    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Validate the required parts, failing on the first one missing.
    pub fn validate(&self) -> QbResult<()> {
        if !self.action.is_set() {
            return Err(QbError::MissingAction);
        }
        if self.table.is_empty() {
            return Err(QbError::MissingTable);
        }
        if matches!(self.action, Action::Insert | Action::Update) && self.field_values.is_empty() {
            return Err(QbError::MissingFieldValues);
        }
        Ok(())
    }

    /// Render the full statement.
    ///
    /// Clause order is fixed: main clause, `where`, `order by`, `limit`.
    /// Optional clauses the action does not permit are left out. Pure: the
    /// same descriptor always renders the same text.
    pub fn render(&self) -> QbResult<String> {
        self.validate()?;

        let mut sql = build_main_clause(self)?;
        let rules = applicability(self.action)?;

        if rules.where_clause && !self.filter.is_empty() {
            sql.push_str(" where ");
            self.filter.write_sql(&mut sql);
        }

        if rules.order_by {
            if let Some(order) = &self.order {
                sql.push_str(" order by ");
                write_ident(&mut sql, &order.field);
                sql.push(' ');
                sql.push_str(order.direction.as_str());
            }
        }

        if rules.limit {
            if let Some(limit) = self.limit {
                sql.push_str(" limit ");
                sql.push_str(&limit.to_string());
            }
        }

        Ok(sql)
    }
}
