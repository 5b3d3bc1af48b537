use serde::{Deserialize, Serialize};

use crate::constraints::{CheckConstraint, Constraint, ForeignKey, Index, PrimaryKey, UniqueConstraint};
use crate::types::SqlType;

/// Full catalog for the sample database: tables plus secondary indexes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub tables: Vec<Table>,
    pub indexes: Vec<Index>,
    /// Legacy table names dropped during clean-slate, beyond `tables`.
    pub legacy_tables: Vec<String>,
}

impl Catalog {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// A table definition in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.constraints.iter().find_map(|constraint| match constraint {
            Constraint::PrimaryKey(pk) => Some(pk),
            _ => None,
        })
    }

    /// Single-column integer surrogate key, when the table has one.
    pub fn surrogate_key(&self) -> Option<&str> {
        let pk = self.primary_key()?;
        if pk.autoincrement && pk.columns.len() == 1 {
            pk.columns.first().map(String::as_str)
        } else {
            None
        }
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.constraints.iter().filter_map(|constraint| match constraint {
            Constraint::ForeignKey(fk) => Some(fk),
            _ => None,
        })
    }

    pub fn unique_constraints(&self) -> impl Iterator<Item = &UniqueConstraint> {
        self.constraints.iter().filter_map(|constraint| match constraint {
            Constraint::Unique(unique) => Some(unique),
            _ => None,
        })
    }

    pub fn check_constraints(&self) -> impl Iterator<Item = &CheckConstraint> {
        self.constraints.iter().filter_map(|constraint| match constraint {
            Constraint::Check(check) => Some(check),
            _ => None,
        })
    }
}

/// Column metadata for a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub sql_type: SqlType,
    pub not_null: bool,
    /// Rendered verbatim as `DEFAULT <literal>` when present.
    pub default: Option<String>,
}

impl Column {
    pub fn new(name: &str, sql_type: SqlType) -> Self {
        Self {
            name: name.to_string(),
            sql_type,
            not_null: false,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default_literal(mut self, literal: &str) -> Self {
        self.default = Some(literal.to_string());
        self
    }
}
