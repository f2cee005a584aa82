//! Error types for docforge library.

use std::io;
use thiserror::Error;

/// Result type alias for docforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting markup or reading templates.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a DOCX package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// A required part is missing from the DOCX package.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error reading or writing the ZIP container.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed WordprocessingML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Style-rule JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A supplied style-rule value is out of range or malformed.
    #[error("Invalid style value for {field}: {reason}")]
    InvalidStyle {
        /// Dotted path of the offending field (e.g. `body.font.size`)
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A formatting attribute in a source document could not be read.
    #[error("Cannot read {field}: {reason}")]
    StyleAttribute {
        /// Attribute being read (e.g. `heading1.font.size`)
        field: String,
        /// Why the read failed
        reason: String,
    },

    /// The document package could not be encoded.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidStyle`].
    pub fn invalid_style(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidStyle {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::StyleAttribute`].
    pub fn attribute(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::StyleAttribute {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
