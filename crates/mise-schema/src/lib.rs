//! Schema contracts for the mise restaurant sample database.
//!
//! This crate defines the table catalog, structured constraints, FK
//! dependency ordering, and SQLite DDL rendering shared by the generator
//! and the sink.

pub mod constraints;
pub mod ddl;
pub mod error;
pub mod graph;
pub mod restaurant;
pub mod schema;
pub mod types;
pub mod validation;

pub use constraints::{
    CheckConstraint, CheckRule, Constraint, FkAction, ForeignKey, Index, PrimaryKey,
    UniqueConstraint,
};
pub use ddl::{create_index_sql, create_table_sql, drop_table_sql};
pub use error::{Error, Result};
pub use graph::{FkGraphReport, insertion_order};
pub use restaurant::restaurant_catalog;
pub use schema::{Catalog, Column, Table};
pub use types::SqlType;
pub use validation::validate_catalog;
