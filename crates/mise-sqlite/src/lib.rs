//! SQLite sink for the mise restaurant database.
//!
//! The sink is the only crate that touches the database file: it applies
//! the catalog DDL, loads a generated [`mise_generate::Population`] inside
//! a single transaction, and declares the secondary indexes last.

pub mod errors;
pub mod options;
pub mod sink;

pub use errors::SinkError;
pub use options::SinkOptions;
pub use sink::{LoadSummary, SqliteSink};
