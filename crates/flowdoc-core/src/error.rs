//! Error types for the workflow interpretation engine

use thiserror::Error;

/// Result alias used throughout flowdoc-core
pub type FlowdocResult<T> = Result<T, FlowdocError>;

/// Engine errors
///
/// Only `Parse` is fatal to a summary run. `FieldTree` is produced per form
/// and recovered by the field inventory walker.
#[derive(Debug, Error)]
pub enum FlowdocError {
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Malformed field tree in form #{form}: {source}")]
    FieldTree {
        form: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid complexity rules: {0}")]
    Rules(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
