//! Composite conditions and the top-level filter expression.
//!
//! [`Expr`] is either a single [`Condition`] or a parenthesised
//! [`CompositeCondition`]. Both sides expose the same two operations,
//! `serialize(include_leading_conjunction)` and `leading_conjunction()`, so a
//! group can stand anywhere a single predicate can, at any nesting depth.
//!
//! The conjunction of the first element of any list (the top-level filter or
//! a group's members) is never rendered; there is nothing before it to join.
//!
//! ```
//! use dbqb::{CompositeCondition, Condition, Operator};
//!
//! let group = CompositeCondition::new([
//!     Condition::and("role", Operator::Equal, "admin"),
//!     Condition::or("role", Operator::Equal, "owner"),
//! ])?;
//! assert_eq!(group.serialize(false), "(`role`='admin' or `role`='owner')");
//! assert_eq!(group.serialize(true), "and (`role`='admin' or `role`='owner')");
//! # Ok::<(), dbqb::QbError>(())
//! ```

use crate::condition::{Condition, Conjunction};
use crate::error::{QbError, QbResult};
use crate::sanitize::InputKind;

/// Condition node: a leaf predicate or a parenthesised group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Leaf(Condition),
    Group(CompositeCondition),
}

impl Expr {
    /// The conjunction this node binds with; for groups, that of the first
    /// member, recursively.
    pub fn leading_conjunction(&self) -> Conjunction {
        match self {
            Expr::Leaf(c) => c.leading_conjunction(),
            Expr::Group(g) => g.leading_conjunction(),
        }
    }

    /// Render the node.
    pub fn serialize(&self, include_leading_conjunction: bool) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, include_leading_conjunction);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, include_leading_conjunction: bool) {
        match self {
            Expr::Leaf(c) => c.write_sql(out, include_leading_conjunction),
            Expr::Group(g) => g.write_sql(out, include_leading_conjunction),
        }
    }

    /// Number of leaf predicates below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Expr::Leaf(_) => 1,
            Expr::Group(g) => g.members.iter().map(Expr::leaf_count).sum(),
        }
    }

    /// Nesting depth: 0 for a leaf, 1 for a group of leaves, ...
    pub fn depth(&self) -> usize {
        match self {
            Expr::Leaf(_) => 0,
            Expr::Group(g) => 1 + g.members.iter().map(Expr::depth).max().unwrap_or(0),
        }
    }

    /// Rebuild the tree with every field and value passed through `f`.
    ///
    /// All-or-nothing: the first failure aborts and nothing is returned.
    pub(crate) fn try_map_text<F>(&self, f: &mut F) -> QbResult<Self>
    where
        F: FnMut(&str, InputKind) -> QbResult<String>,
    {
        match self {
            Expr::Leaf(c) => c.try_map_text(f).map(Expr::Leaf),
            Expr::Group(g) => g.try_map_text(f).map(Expr::Group),
        }
    }
}

impl From<Condition> for Expr {
    fn from(c: Condition) -> Self {
        Expr::Leaf(c)
    }
}

impl From<CompositeCondition> for Expr {
    fn from(g: CompositeCondition) -> Self {
        Expr::Group(g)
    }
}

/// A parenthesised, non-empty group of condition nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeCondition {
    members: Vec<Expr>,
    first_conjunction: Conjunction,
}

impl CompositeCondition {
    /// Create a group from its members.
    ///
    /// Fails with `InvalidArgument` if `members` is empty.
    pub fn new<I, E>(members: I) -> QbResult<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let members: Vec<Expr> = members.into_iter().map(Into::into).collect();
        let first_conjunction = members
            .first()
            .map(Expr::leading_conjunction)
            .ok_or_else(|| {
                QbError::invalid_argument("composite condition requires at least one member")
            })?;
        Ok(Self {
            members,
            first_conjunction,
        })
    }

    pub fn members(&self) -> &[Expr] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The conjunction of the first member, recursively.
    pub fn leading_conjunction(&self) -> Conjunction {
        self.first_conjunction
    }

    /// Render the group as `[conj ](m0 conj1 m1 ...)`.
    pub fn serialize(&self, include_leading_conjunction: bool) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, include_leading_conjunction);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, include_leading_conjunction: bool) {
        if include_leading_conjunction {
            out.push_str(self.first_conjunction.as_str());
            out.push(' ');
        }
        out.push('(');
        write_members(out, &self.members);
        out.push(')');
    }

    fn try_map_text<F>(&self, f: &mut F) -> QbResult<Self>
    where
        F: FnMut(&str, InputKind) -> QbResult<String>,
    {
        let members = self
            .members
            .iter()
            .map(|m| m.try_map_text(f))
            .collect::<QbResult<Vec<_>>>()?;
        Ok(Self {
            members,
            first_conjunction: self.first_conjunction,
        })
    }
}

/// Write a list of nodes separated by single spaces; the first node's
/// conjunction is suppressed.
fn write_members(out: &mut String, members: &[Expr]) {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        member.write_sql(out, i > 0);
    }
}

/// The top-level filter of a statement: an ordered list of condition nodes.
///
/// Rendered without the `where` keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    exprs: Vec<Expr>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self { exprs: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Append a node.
    pub fn push(&mut self, expr: impl Into<Expr>) {
        self.exprs.push(expr.into());
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    /// Total number of leaf predicates.
    pub fn leaf_count(&self) -> usize {
        self.exprs.iter().map(Expr::leaf_count).sum()
    }

    /// Render the filter body (no `where`).
    pub fn build(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        write_members(out, &self.exprs);
    }
}
