//! Error types for CDL operations.
//!
//! Two severities exist in the CDL model and parsers:
//!
//! - **Fatal** conditions are returned as [`CdlError`] values: empty input,
//!   an unknown flavour label, a document with no color items, or a
//!   first-item request on an empty collection.
//! - **Recoverable** conditions (a malformed field inside one correction, a
//!   missing id) are contained at the record boundary, logged through
//!   `tracing`, and never surface as `Err`.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`CdlError`] as the error type.
pub type CdlResult<T> = std::result::Result<T, CdlError>;

/// Errors that can occur while loading or querying CDL data.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
#[derive(Debug, Error)]
pub enum CdlError {
    /// The input text was empty or absent.
    ///
    /// Loading from an empty string is always a fatal error; an
    /// empty-but-successful container is never returned.
    #[error("empty CDL input")]
    EmptyInput,

    /// A flavour label could not be recognized.
    ///
    /// Returned by `Flavour::from_str` in `cdl-io` for labels other than
    /// the XML and EDL encodings.
    #[error("unknown CDL flavour: {0:?}")]
    UnknownFlavour(String),

    /// The XML document contains neither `ColorDecision` nor
    /// `ColorCorrection` elements.
    #[error("no color items found")]
    NoColorItems,

    /// A first-item request was made against an empty container.
    #[error("no color item available")]
    NoItemAvailable,

    /// A first-correction request was made against an empty decision.
    #[error("no color correction available")]
    NoCorrectionAvailable,

    /// A tuple source did not split into the expected number of values.
    #[error("expected {expected} values, got {got}")]
    Tuple {
        /// Expected value count (always 3 for SOP triples)
        expected: usize,
        /// Actual token count found in the source text
        got: usize,
    },

    /// A text fragment could not be converted to a number as a whole.
    ///
    /// Raised for scalar fields such as `Saturation`; tuple fields use the
    /// more lenient per-token policy instead (see [`crate::value`]).
    #[error("invalid number: {0:?}")]
    Conversion(String),

    /// The document text is not well-formed for its encoding.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error during file operations.
    ///
    /// Wraps [`std::io::Error`] for file loading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CdlError {
    /// Creates a [`CdlError::Parse`] error.
    #[inline]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(CdlError::EmptyInput.to_string(), "empty CDL input");
        assert_eq!(CdlError::NoColorItems.to_string(), "no color items found");
        let err = CdlError::Tuple { expected: 3, got: 2 };
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("2"));
    }

    #[test]
    fn test_unknown_flavour_names_label() {
        let err = CdlError::UnknownFlavour("yaml".to_string());
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CdlError = io_err.into();
        assert!(err.is_io_error());
    }
}
