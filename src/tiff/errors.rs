//! Custom error types for TIFF processing

use std::fmt;
use std::io;

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Input is not a little-endian TIFF/BigTIFF this tool can handle
    UnsupportedFormat(String),
    /// End of file reached before a complete structure could be read
    Truncated,
    /// Unknown TIFF field type code
    InvalidType(u16),
    /// Label or macro directory is missing an expected tag
    LabelMacroNotFound(String),
    /// A relocated offset would fall outside the slide file
    RelocationOutOfRange(u64),
    /// Caller supplied an invalid argument
    InvalidParameter(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            TiffError::Truncated => write!(f, "File truncated before a complete structure"),
            TiffError::InvalidType(ft) => write!(f, "Invalid TIFF field type: {}", ft),
            TiffError::LabelMacroNotFound(msg) => {
                write!(f, "Label/macro directory not found: {}", msg)
            }
            TiffError::RelocationOutOfRange(offset) => {
                write!(f, "Relocated offset {} is out of range", offset)
            }
            TiffError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            TiffError::Truncated
        } else {
            TiffError::IoError(error)
        }
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
