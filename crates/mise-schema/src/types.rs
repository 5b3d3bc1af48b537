use serde::{Deserialize, Serialize};

/// SQLite column affinity used by the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    Integer,
    Real,
    Text,
    /// Stored as ISO-8601 text; declared `DATE` for downstream consumers.
    Date,
}

impl SqlType {
    /// Keyword used in rendered DDL.
    pub fn ddl_keyword(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
            SqlType::Date => "DATE",
        }
    }
}
