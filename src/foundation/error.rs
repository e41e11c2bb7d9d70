use std::path::PathBuf;

/// Convenience result type used across bearsmith.
pub type BearResult<T> = Result<T, BearError>;

/// Fatal error taxonomy.
///
/// A member that cannot be found in any tier is not an error: it is reported as
/// [`crate::Resolution::NotFound`]. Everything here maps to a server-side failure.
#[derive(thiserror::Error, Debug)]
pub enum BearError {
    /// Invalid caller-provided input (for example an empty compose set).
    #[error("validation error: {0}")]
    Validation(String),

    /// A member was located but its bytes are not a decodable image.
    #[error("decode error: {origin}: {source}")]
    Decode {
        /// Where the undecodable bytes came from.
        origin: String,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// A tier failed with an IO error other than "does not exist".
    #[error("io error: {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The composed image could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid runtime configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BearError {
    /// Build a [`BearError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BearError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BearError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
