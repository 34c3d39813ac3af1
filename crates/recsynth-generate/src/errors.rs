use thiserror::Error;

/// Errors emitted by the synthesis engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] recsynth_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl GenerationError {
    /// True when the failure came from caller-supplied options or records.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GenerationError::Core(err) if err.is_configuration())
    }
}
