//! Error types for orthomapper

use std::fmt;
use std::io;

/// Result type for orthomapper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in orthomapper operations
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Bounds outside the geodetic domain (still projected, most likely)
    InvalidBounds(String),

    /// Image metadata carries no GPS position
    MissingGps,

    /// A single tile failed to crop/resize/composite
    TileRender(String),

    /// Projection error
    Projection(String),

    /// Invalid caller-supplied input
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            Error::MissingGps => write!(f, "No GPS position in image metadata"),
            Error::TileRender(msg) => write!(f, "Tile render failed: {}", msg),
            Error::Projection(msg) => write!(f, "Projection error: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidBounds("latitude 1000".to_string());
        assert_eq!(err.to_string(), "Invalid bounds: latitude 1000");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_missing_gps_display() {
        assert!(Error::MissingGps.to_string().contains("GPS"));
    }
}
