//! Error types for surgemap

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for surgemap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster: {reason}")]
    InvalidRaster { reason: String },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    DimensionMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid configuration: {name} = {value} ({reason})")]
    InvalidConfiguration {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Resource unavailable: {path}: {reason}")]
    ResourceUnavailable { path: PathBuf, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for surgemap operations
pub type Result<T> = std::result::Result<T, Error>;
