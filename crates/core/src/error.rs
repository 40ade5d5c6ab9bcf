//! Error types for Distill operations.
//!
//! The extraction engine itself is total: locating, walking, deduplicating,
//! encoding and rendering never fail. [`DistillError`] covers the boundary
//! operations around it: fetching, file I/O, selector parsing, serialization,
//! and the "nothing was extracted" signal.
//!
//! # Example
//!
//! ```rust
//! use distill_core::{DistillError, distill};
//!
//! match distill("<html><body></body></html>", "https://example.com/") {
//!     Ok(text) => println!("{text}"),
//!     Err(DistillError::NoContent) => println!("page had no extractable content"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for distill operations.
#[derive(Error, Debug)]
pub enum DistillError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Extraction produced zero blocks.
    ///
    /// Callers treat this as an extraction failure and report it upward.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O failed: {0}")]
    WriteError(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DistillError {
    fn from(err: serde_json::Error) -> Self {
        DistillError::Serialization(err.to_string())
    }
}

/// Result type alias for DistillError.
pub type Result<T> = std::result::Result<T, DistillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DistillError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_no_content_error() {
        let err = DistillError::NoContent;
        assert!(err.to_string().contains("No content"));
    }

    #[test]
    fn test_timeout_error() {
        let err = DistillError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_serialization_from_serde() {
        let err: DistillError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, DistillError::Serialization(_)));
    }
}
