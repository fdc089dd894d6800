//! Error types for wafer-map analysis.
//!
//! Only whole-run failures surface as [`MapError`]. Problems confined to a
//! single row or a single die slot are logged and counted instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wafer-map operations.
pub type Result<T> = std::result::Result<T, MapError>;

/// Error type for loading, analyzing and exporting wafer maps.
#[derive(Error, Debug)]
pub enum MapError {
    /// A document or summary file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON, or a consumed field has the wrong shape.
    #[error("Malformed wafer map document: {message}")]
    Format {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An analysis result could not be encoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid analysis configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MapError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a format error from a message and optional source.
    pub fn format<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Format {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
