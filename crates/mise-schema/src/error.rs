use thiserror::Error;

/// Schema error type shared across mise crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog violates internal invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// The FK graph contains a cycle and no insertion order exists.
    #[error("cyclic foreign-key graph: {0:?}")]
    CyclicGraph(Vec<String>),
    /// A named table is not part of the catalog.
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

/// Convenience alias for results returned by mise-schema.
pub type Result<T> = std::result::Result<T, Error>;
