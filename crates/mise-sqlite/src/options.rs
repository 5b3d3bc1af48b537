use std::path::PathBuf;

/// Connection options for the SQLite sink.
#[derive(Debug, Clone)]
pub struct SinkOptions {
    /// Database file; created when missing.
    pub path: PathBuf,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("restaurant_management.db"),
        }
    }
}

impl SinkOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
