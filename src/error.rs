//! Error types for citeform library.

use std::io;
use thiserror::Error;

/// Result type alias for citeform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during citation analysis and layout.
///
/// Detection and parsing never fail: an empty document simply yields empty
/// results. Only configuration problems surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The style identifier is not one of mla, apa, chicago.
    #[error("Invalid citation style: {0}")]
    InvalidStyle(String),

    /// The unit identifier is not one of point, inch, mm, pixel.
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Page size or margins would leave no usable content area.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// A numeric parameter is out of range (font size, lines per page, ...).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error during rendering (JSON, paged text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error stems from caller-supplied configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidStyle(_)
                | Error::InvalidUnit(_)
                | Error::InvalidGeometry(_)
                | Error::InvalidParameter(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidStyle("harvard".to_string());
        assert_eq!(err.to_string(), "Invalid citation style: harvard");

        let err = Error::InvalidGeometry("left + right margins exceed page width".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid page geometry: left + right margins exceed page width"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_errors() {
        assert!(Error::InvalidUnit("furlong".into()).is_configuration());
        assert!(Error::InvalidParameter("font size".into()).is_configuration());
        assert!(!Error::Render("json".into()).is_configuration());
    }
}
