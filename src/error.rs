use thiserror::Error;

/// Failures surfaced to callers of the processing pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input file is unreadable, is not tabular data, or has no columns.
    #[error("Input error: {0}")]
    Input(String),

    /// The output document could not be written.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Non-fatal diagnostic from the presentation pass.
///
/// When one of these is produced the data write has already succeeded and
/// the output document is complete, just unformatted.
#[derive(Debug, Clone, Error)]
#[error("could not apply cell formatting: {0}")]
pub struct FormattingWarning(pub String);
