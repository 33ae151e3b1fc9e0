//! Errors for translation.

/// A type for translation errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to serialize geometry: {0}")]
    GeometrySerialization(#[from] serde_json::Error),
    #[error("serialized geometry is not valid UTF-8: {0}")]
    GeometryEncoding(#[from] std::string::FromUtf8Error),
}
