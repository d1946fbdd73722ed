//! XML error types.

use std::io;

/// Errors that can occur during XML reading or writing.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// A malformed token stream, with the byte offset of the failure.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed {
        /// Byte offset into the input where reading failed.
        position: u64,
        /// What went wrong.
        message: String,
    },

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// An unexpected XML element was encountered.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// An error parsing a value from XML text content.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}

impl XmlError {
    /// Build a [`XmlError::Malformed`] at the given reader position.
    pub fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }
}
