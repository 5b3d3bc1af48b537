use thiserror::Error;

/// Errors emitted by the SQLite sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Schema(#[from] mise_schema::Error),
    #[error("dataset table not in catalog: {0}")]
    UnknownTable(String),
}
