use thiserror::Error;

/// Errors raised while loading style inputs or flushing stylesheet documents.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Input file extension is not a supported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Parsing an input file failed
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Writing the finished document to its target failed
    #[error("Flush failed for {path}: {source}")]
    Flush {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Underlying I/O error while reading inputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
