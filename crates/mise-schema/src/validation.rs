use std::collections::{BTreeMap, BTreeSet};

use crate::constraints::Constraint;
use crate::error::{Error, Result};
use crate::schema::Catalog;

/// Validate internal consistency of a catalog.
///
/// This checks:
/// - duplicate tables/columns
/// - primary key, unique, and check columns exist
/// - foreign key columns and referenced targets exist
/// - index targets exist
pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    let mut tables: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for table in &catalog.tables {
        if tables.contains_key(&table.name) {
            return Err(Error::InvalidCatalog(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.clone()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }

        tables.insert(table.name.clone(), columns);
    }

    for table in &catalog.tables {
        let columns = &tables[&table.name];

        for constraint in &table.constraints {
            match constraint {
                Constraint::PrimaryKey(pk) => {
                    for column in &pk.columns {
                        if !columns.contains(column) {
                            return Err(Error::InvalidCatalog(format!(
                                "primary key column not found: {}.{}",
                                table.name, column
                            )));
                        }
                    }
                    if pk.autoincrement && pk.columns.len() != 1 {
                        return Err(Error::InvalidCatalog(format!(
                            "autoincrement requires a single-column key: {}",
                            table.name
                        )));
                    }
                }
                Constraint::Unique(unique) => {
                    for column in &unique.columns {
                        if !columns.contains(column) {
                            return Err(Error::InvalidCatalog(format!(
                                "unique column not found: {}.{}",
                                table.name, column
                            )));
                        }
                    }
                }
                Constraint::Check(check) => {
                    if !columns.contains(&check.column) {
                        return Err(Error::InvalidCatalog(format!(
                            "check column not found: {}.{}",
                            table.name, check.column
                        )));
                    }
                }
                Constraint::ForeignKey(fk) => {
                    for column in &fk.columns {
                        if !columns.contains(column) {
                            return Err(Error::InvalidCatalog(format!(
                                "foreign key column not found: {}.{}",
                                table.name, column
                            )));
                        }
                    }

                    let ref_columns = tables.get(&fk.referenced_table).ok_or_else(|| {
                        Error::InvalidCatalog(format!(
                            "referenced table not found: {}",
                            fk.referenced_table
                        ))
                    })?;

                    for column in &fk.referenced_columns {
                        if !ref_columns.contains(column) {
                            return Err(Error::InvalidCatalog(format!(
                                "referenced column not found: {}.{}",
                                fk.referenced_table, column
                            )));
                        }
                    }
                }
            }
        }
    }

    for index in &catalog.indexes {
        let columns = tables.get(&index.table).ok_or_else(|| {
            Error::InvalidCatalog(format!("index targets unknown table: {}", index.table))
        })?;
        for column in &index.columns {
            if !columns.contains(column) {
                return Err(Error::InvalidCatalog(format!(
                    "index column not found: {}.{}",
                    index.table, column
                )));
            }
        }
    }

    Ok(())
}
