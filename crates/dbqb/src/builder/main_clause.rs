//! Opening clause of each statement kind.

use super::descriptor::{FieldValues, StatementDescriptor};
use crate::action::Action;
use crate::error::{QbError, QbResult};
use crate::ident::{write_comma_list, write_ident, write_literal};

/// `` select `a`, `b` from `t` `` (or `select * from ...` without columns).
pub fn build_select_clause(columns: &[String], table: &str) -> QbResult<String> {
    if table.is_empty() {
        return Err(QbError::MissingTable);
    }
    let mut clause = String::with_capacity(32 + table.len());
    clause.push_str("select ");
    if columns.is_empty() {
        clause.push('*');
    } else {
        write_comma_list(&mut clause, columns.iter().map(String::as_str), write_ident);
    }
    clause.push_str(" from ");
    write_ident(&mut clause, table);
    Ok(clause)
}

/// `` insert into `t` (`a`, `b`) values ('1', '2') ``
///
/// Field and value lists follow the iteration order of `field_values`.
pub fn build_insert_clause(table: &str, field_values: &FieldValues) -> QbResult<String> {
    check_table_and_values(table, field_values)?;
    let mut clause = String::from("insert into ");
    write_ident(&mut clause, table);
    clause.push_str(" (");
    write_comma_list(&mut clause, field_values.fields(), write_ident);
    clause.push_str(") values (");
    write_comma_list(&mut clause, field_values.values(), write_literal);
    clause.push(')');
    Ok(clause)
}

/// `` update `t` set `a`='1', `b`='2' ``
pub fn build_update_clause(table: &str, field_values: &FieldValues) -> QbResult<String> {
    check_table_and_values(table, field_values)?;
    let mut clause = String::from("update ");
    write_ident(&mut clause, table);
    clause.push_str(" set ");
    for (i, (field, value)) in field_values.iter().enumerate() {
        if i > 0 {
            clause.push_str(", ");
        }
        write_ident(&mut clause, field);
        clause.push('=');
        write_literal(&mut clause, value);
    }
    Ok(clause)
}

/// `` delete from `t` ``
pub fn build_delete_clause(table: &str) -> QbResult<String> {
    if table.is_empty() {
        return Err(QbError::MissingTable);
    }
    let mut clause = String::from("delete from ");
    write_ident(&mut clause, table);
    Ok(clause)
}

/// Dispatch to the clause builder for the descriptor's action.
///
/// Fails with `UnsupportedAction` when no action is set.
pub fn build_main_clause(descriptor: &StatementDescriptor) -> QbResult<String> {
    let table = descriptor.table();
    match descriptor.action() {
        Action::Select => build_select_clause(descriptor.columns(), table),
        Action::Insert => build_insert_clause(table, descriptor.field_values()),
        Action::Update => build_update_clause(table, descriptor.field_values()),
        Action::Delete => build_delete_clause(table),
        action @ Action::None => Err(QbError::UnsupportedAction(action)),
    }
}

fn check_table_and_values(table: &str, field_values: &FieldValues) -> QbResult<()> {
    if table.is_empty() {
        return Err(QbError::MissingTable);
    }
    if field_values.is_empty() {
        return Err(QbError::MissingFieldValues);
    }
    Ok(())
}
