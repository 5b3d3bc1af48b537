use serde::{Deserialize, Serialize};

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableReport {
    pub table: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    /// Locally regenerated rows (unique or check collisions); not errors.
    pub retries: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub retries_total: u64,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            retries_total: 0,
            duration_ms: 0,
        }
    }

    pub fn rows_generated(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|entry| entry.table == table)
            .map(|entry| entry.rows_generated)
    }
}
