use std::path::PathBuf;

use thiserror::Error;

/// Errors from the ordinal-index side of the view table.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The ordinal processing index has no corresponding view.
    #[error("View index out of range: {index} (scene declares {count} views)")]
    OutOfRange { index: usize, count: usize },
}

/// I/O errors raised while acquiring an artifact file handle.
///
/// Handle acquisition is fail-fast: a caller either gets an open stream or an
/// error naming the exact path that was attempted, never a placeholder.
#[derive(Debug, Error)]
pub enum IoError {
    /// The resolved artifact path could not be opened in the requested mode.
    #[error("Cannot open artifact file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised by the staged image loader.
///
/// Every variant carries the path of the offending artifact so an operator
/// can locate it without additional tooling.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read or decoded.
    #[error("Cannot read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Decoded geometry disagrees with the dimensions declared by the scene.
    ///
    /// Fatal for the artifact being loaded; never retried.
    #[error(
        "Bad image dimensions for {}: expected {expected_width}x{expected_height}, \
         got {actual_width}x{actual_height}",
        path.display()
    )]
    DimensionMismatch {
        path: PathBuf,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// I/O failure while scanning embedded metadata.
    #[error("Cannot read metadata of {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The embedded metadata header is structurally invalid.
    #[error("Malformed metadata in {}: {message}", path.display())]
    Metadata { path: PathBuf, message: String },
}

/// Errors raised while loading a scene manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("Cannot read scene manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or is missing required fields.
    #[error("Malformed scene manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised while reading plain-text calibration matrices.
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// The artifact handle could not be acquired.
    #[error(transparent)]
    Open(#[from] IoError),

    /// The matrix payload could not be read.
    #[error("Cannot read calibration matrix: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer than 12 values were found in the payload.
    #[error("Truncated calibration matrix: expected 12 values, got {count}")]
    Truncated { count: usize },

    /// A token in the payload is not a floating-point value.
    #[error("Invalid calibration value {value:?}: {source}")]
    Parse {
        value: String,
        source: std::num::ParseFloatError,
    },
}
