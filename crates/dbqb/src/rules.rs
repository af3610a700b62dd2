//! Which optional clauses each action may carry.
//!
//! | Action | where | order by | limit |
//! |--------|-------|----------|-------|
//! | insert | no    | no       | no    |
//! | select | yes   | yes      | yes   |
//! | update | yes   | yes      | yes   |
//! | delete | yes   | yes      | yes   |
//!
//! Clauses that are set but not applicable are dropped from the output
//! without an error.

use crate::action::Action;
use crate::error::{QbError, QbResult};

/// Optional clauses permitted for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applicability {
    pub where_clause: bool,
    pub order_by: bool,
    pub limit: bool,
}

impl Applicability {
    const NONE: Self = Self {
        where_clause: false,
        order_by: false,
        limit: false,
    };

    const ALL: Self = Self {
        where_clause: true,
        order_by: true,
        limit: true,
    };
}

/// Look up the clause rules for `action`.
///
/// Fails with `UnknownAction` for [`Action::None`].
pub fn applicability(action: Action) -> QbResult<Applicability> {
    match action {
        Action::Insert => Ok(Applicability::NONE),
        Action::Select | Action::Update | Action::Delete => Ok(Applicability::ALL),
        Action::None => Err(QbError::UnknownAction(action.to_string())),
    }
}
