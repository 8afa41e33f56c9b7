use thiserror::Error;

/// Canonical result for every asyncq crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed failure raised by a caller's asynchronous producer.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation canceled before the source was resolved")]
    Canceled,

    #[error("Sequence contains no elements")]
    EmptySequence,

    #[error("Sequence contains more than one matching element")]
    MultipleMatches,

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Arithmetic overflow during aggregation")]
    Overflow,

    // Producers surface their own failures through this variant; the binding
    // layer hands it back untouched.
    #[error("Source failed: {0}")]
    Source(#[source] SourceError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an arbitrary producer failure.
    pub fn source<E>(err: E) -> Self
    where
        E: Into<SourceError>,
    {
        Error::Source(err.into())
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Error::Canceled)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Source(Box::new(e))
    }
}
