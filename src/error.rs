//! Error types for mapcdb
//!
//! Provides a unified error type for all reader operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CdbError
pub type Result<T> = std::result::Result<T, CdbError>;

/// Unified error type for mapcdb operations
#[derive(Debug, Error)]
pub enum CdbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database file not found: {}", .0.display())]
    NotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    /// The file does not have the shape its own length fields describe
    #[error("Structural corruption: {0}")]
    StructuralCorruption(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
