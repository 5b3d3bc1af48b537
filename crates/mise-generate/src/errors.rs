use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] mise_schema::Error),
    #[error("no field rule for column {table}.{column}")]
    MissingRule { table: String, column: String },
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("missing parent table '{table}' for foreign key")]
    MissingParent { table: String },
    #[error("parent table '{table}' has no rows")]
    EmptyParent { table: String },
    #[error("column {table}.{column} is NOT NULL but generated null")]
    NullViolation { table: String, column: String },
    #[error("gave up on row {row} of '{table}' after {attempts} attempts")]
    RetriesExhausted {
        table: String,
        row: u64,
        attempts: u32,
    },
}
