use thiserror::Error;

/// Core error type shared across recsynth crates.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Options or input records are missing values or out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// The study id pool cannot satisfy the request.
    #[error("identifier pool exhausted: requested {requested}, {available} available")]
    Exhaustion { requested: usize, available: usize },
    /// A field name is not part of the record schema.
    #[error("schema error: {0}")]
    Schema(String),
}

impl Error {
    /// True for errors caused by caller input rather than generation state.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::Schema(_))
    }
}

/// Convenience alias for results returned by recsynth crates.
pub type Result<T> = std::result::Result<T, Error>;
