use thiserror::Error;
use tracing::{debug, error};

/// Errors surfaced by compaction planning.
#[derive(Debug, Error)]
pub enum CompactionError {
    #[error("Invalid compaction config: {0}")]
    InvalidConfig(String),

    #[error("Unknown compaction strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid partition date format in '{partition}': {source}")]
    InvalidPartitionDate {
        partition: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Date offset out of range: {0} days")]
    DateOutOfRange(i64),

    #[error("Settings load failed: {0}")]
    Config(#[from] config::ConfigError),
}

impl CompactionError {
    pub fn log_error(&self) {
        match self {
            CompactionError::InvalidConfig(msg) => {
                error!("Invalid compaction config: {}", msg);
            }
            CompactionError::UnknownStrategy(name) => {
                error!("Unknown compaction strategy: {}", name);
            }
            CompactionError::InvalidPartitionDate { partition, source } => {
                error!("Partition '{}' is not a date partition", partition);
                debug!("Partition date parse error details: {:?}", source);
            }
            CompactionError::DateOutOfRange(offset) => {
                error!("Date offset out of range: {}", offset);
            }
            CompactionError::Config(e) => {
                error!("Settings load failed: {}", e);
                debug!("Settings error details: {:?}", e);
            }
        }
    }
}
