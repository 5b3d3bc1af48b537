//! SQLite DDL rendering for the catalog.

use std::fmt::Write as _;

use crate::constraints::{FkAction, Index};
use crate::schema::Table;

/// Render `CREATE TABLE IF NOT EXISTS` for a table.
///
/// Single-column autoincrement keys, single-column UNIQUE, and CHECK rules
/// render inline on their column; composite keys and foreign keys render as
/// table-level clauses.
pub fn create_table_sql(table: &Table) -> String {
    let mut clauses: Vec<String> = Vec::new();

    for column in &table.columns {
        let mut clause = format!("    {} {}", column.name, column.sql_type.ddl_keyword());

        if is_surrogate_key(table, &column.name) {
            clause.push_str(" PRIMARY KEY AUTOINCREMENT");
        }

        if is_single_column_unique(table, &column.name) {
            clause.push_str(" UNIQUE");
        }

        for check in table.check_constraints() {
            if check.column == column.name {
                let _ = write!(clause, " CHECK({})", check.rule.render_sql(&check.column));
            }
        }

        if column.not_null {
            clause.push_str(" NOT NULL");
        }

        if let Some(default) = &column.default {
            let _ = write!(clause, " DEFAULT {default}");
        }

        clauses.push(clause);
    }

    if let Some(pk) = table.primary_key()
        && table.surrogate_key().is_none()
    {
        clauses.push(format!("    PRIMARY KEY ({})", pk.columns.join(", ")));
    }

    for fk in table.foreign_keys() {
        let mut clause = format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.columns.join(", "),
            fk.referenced_table,
            fk.referenced_columns.join(", ")
        );
        if fk.on_delete == FkAction::Cascade {
            clause.push_str(" ON DELETE CASCADE");
        }
        clauses.push(clause);
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        table.name,
        clauses.join(",\n")
    )
}

/// Render `CREATE INDEX IF NOT EXISTS` for a secondary index.
pub fn create_index_sql(index: &Index) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {}({})",
        index.name,
        index.table,
        index.columns.join(", ")
    )
}

/// Render `DROP TABLE IF EXISTS` for a table name.
pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

fn is_surrogate_key(table: &Table, column: &str) -> bool {
    table.surrogate_key() == Some(column)
}

fn is_single_column_unique(table: &Table, column: &str) -> bool {
    table
        .unique_constraints()
        .any(|unique| unique.columns.len() == 1 && unique.columns[0] == column)
}
