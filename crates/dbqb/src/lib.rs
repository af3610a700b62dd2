//! # dbqb
//!
//! Builds MySQL-flavoured statement text from typed inputs.
//!
//! ## Features
//!
//! - **Four actions**: `select`, `insert`, `update` and `delete`
//! - **Nested conditions**: leaf predicates and parenthesised groups at any depth
//! - **Fixed clause rules**: INSERT never carries `where`, `order by` or `limit`
//! - **Sanitized input**: every table, column and value goes through a [`Sanitizer`]
//! - **TOML configuration**: sanitizer policy and logging settings
//! - **Tracing**: built statements and rejected input (feature `tracing`)
//!
//! No database connection is involved; the output is a single string with
//! identifiers in backticks and values inlined as single-quoted literals.
//!
//! ```
//! use dbqb::{Action, CompositeCondition, Condition, Operator, StatementBuilder};
//!
//! let mut qb = StatementBuilder::new();
//! qb.set_table("Users")?
//!     .set_action(Action::Select)?
//!     .add_condition(Condition::and("age", Operator::GreaterOrEqual, "18"))?
//!     .add_composite_condition([
//!         Condition::and("role", Operator::Equal, "admin"),
//!         Condition::or("role", Operator::Equal, "owner"),
//!     ])?;
//!
//! assert_eq!(
//!     qb.build()?,
//!     "select * from `Users` where `age`>='18' and (`role`='admin' or `role`='owner')"
//! );
//! # Ok::<(), dbqb::QbError>(())
//! ```

pub mod action;
pub mod builder;
pub mod condition;
pub mod config;
pub mod error;
pub mod expr;
pub mod ident;
pub mod prelude;
pub mod rules;
pub mod sanitize;

mod trace;

pub use action::{Action, Order};
pub use builder::{BuilderState, FieldValues, OrderBy, StatementBuilder, StatementDescriptor};
pub use condition::{Condition, Conjunction, Operator};
pub use config::{LogConfig, QbConfig, QuotePolicy, SanitizerConfig};
pub use error::{QbError, QbResult};
pub use expr::{CompositeCondition, Expr, FilterExpr};
pub use ident::{quote_ident, quote_literal};
pub use rules::{Applicability, applicability};
pub use sanitize::{FnSanitizer, InputKind, NoopSanitizer, PolicySanitizer, Sanitizer, sanitize_fn};
