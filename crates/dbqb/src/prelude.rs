//! Convenient imports for typical `dbqb` usage.
//!
//! ```
//! use dbqb::prelude::*;
//! ```

pub use crate::{
    Action, CompositeCondition, Condition, Conjunction, Expr, Operator, Order, QbError, QbResult,
    StatementBuilder,
};
pub use crate::{InputKind, PolicySanitizer, Sanitizer};
