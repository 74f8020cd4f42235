//! Error types for the Folio image-resource subsystem.
//!
//! Load failures are recovered inside the resource loader and surface to the
//! layout engine only as resources with an absent image. The error enums
//! exist so the individual stages (decode, embedded data, fetch) can report
//! precisely what went wrong to the log and to direct API users.

use thiserror::Error;

/// Top-level error type for Folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize configuration back to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Image loading errors, organized by stage.
///
/// Every variant is non-fatal to a rendering session: the loader logs it and
/// hands the caller a resource with no image.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No byte stream could be obtained for the reference
    /// (unsupported scheme, not found, unreachable)
    #[error("no stream obtainable for '{reference}'")]
    Unresolvable { reference: String },

    /// An embedded data reference carried a malformed or non-base64 payload
    #[error("embedded image data is malformed: {message}")]
    EmbeddedData { message: String },

    /// The fetched bytes are not a recognized or parsable image encoding
    #[error("cannot decode image bytes: {message}")]
    Decode { message: String },

    /// The reference points at a PDF document; PDF-as-image is unimplemented
    #[error("PDF-as-image is not implemented for '{reference}'")]
    PdfUnsupported { reference: String },

    /// Reading the byte stream failed partway through
    #[error("cannot read stream for '{reference}': {source}")]
    Io {
        reference: String,
        source: std::io::Error,
    },
}

/// Convenience type alias for Folio results.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Convenience type alias for load-stage results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
