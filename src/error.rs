//! Error types for the agent

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading, saving, or feeding the agent
#[derive(Error, Debug)]
pub enum Error {
    /// Evaluation was requested but there is no saved table to evaluate
    #[error("no saved Q-table at {}", path.display())]
    MissingModel { path: PathBuf },

    /// The table file could not be read or written
    #[error("Q-table storage error at {}: {source}", path.display())]
    StorageIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The table file exists but is not a key -> action -> value mapping
    #[error("malformed Q-table at {}: {source}", path.display())]
    MalformedTable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The raw state text could not be parsed into a snapshot
    #[error("invalid state snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, Error>;
