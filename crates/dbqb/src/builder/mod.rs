//! Statement builder.
//!
//! ## Design
//!
//! - [`StatementBuilder`] collects the table, action, columns, values and
//!   filter of one statement and renders it with [`StatementBuilder::build`].
//! - All untrusted text goes through a [`Sanitizer`](crate::Sanitizer) before
//!   it is stored; values are inlined as quoted literals.
//! - Optional clauses follow [`applicability`](crate::rules::applicability):
//!   INSERT never carries `where`, `order by` or `limit`.
//! - Clause order is fixed: main clause, `where`, `order by`, `limit`.

pub mod descriptor;
pub mod main_clause;
pub mod statement;

pub use descriptor::{FieldValues, OrderBy, StatementDescriptor};
pub use main_clause::{
    build_delete_clause, build_insert_clause, build_main_clause, build_select_clause,
    build_update_clause,
};
pub use statement::{BuilderState, StatementBuilder};
