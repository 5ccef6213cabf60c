use thiserror::Error;

/// Failure to load a tree, token dump or vocabulary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vocabulary line {line}: {message}")]
    Vocabulary { line: usize, message: String },

    #[error("channel {channel} maps to column {column}, but only {len} channel names are defined")]
    ChannelColumn { channel: usize, column: usize, len: usize },
}
