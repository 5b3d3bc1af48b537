//! Constraint-aware generation engine for the mise restaurant database.
//!
//! This crate produces an in-memory dataset honoring the catalog's foreign
//! keys, check rules, and unique constraints. Nothing here touches the
//! database; the sink consumes the finished [`Population`].

pub mod checks;
pub mod engine;
pub mod errors;
pub mod fields;
pub mod foreign;
pub mod profile;
pub mod report;
pub mod values;

pub use engine::{Engine, EngineOptions, Population, TableRows};
pub use errors::GenerateError;
pub use fields::FieldRule;
pub use profile::{restaurant_profile, AggregateRule, Profile, RowCountLink};
pub use report::{RunReport, TableReport};
pub use values::{Row, Value};
