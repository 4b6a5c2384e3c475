//! Error types for extract-docs.
//!
//! Recoverable per-document failures are reported through
//! [`crate::outcome::Extraction`]; this enum covers the error values that
//! feed into those outcomes plus the one genuinely fatal path (output
//! directory creation).

/// All errors that can occur while reading sources and writing docs.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ExtractError {
    /// I/O error (file read, output write, directory creation).
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error from the `zip` crate (.xlsx container).
    #[cfg(feature = "xlsx")]
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    /// Document-level error (corrupt file, missing workbook parts).
    #[error("{0}")]
    Document(String),
}

/// Convenience alias used throughout the crate.
pub(crate) type Result<T> = std::result::Result<T, ExtractError>;
