use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core module.
///
/// Every variant is terminal for the conversion that raised it.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input is missing or is not a decodable image.
    #[error("Unable to read input file {path}: {reason}")]
    Decode {
        /// Path that failed to decode.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Mixed or non-positive scaling factors.
    #[error("Invalid scaling parameters: {0}")]
    InvalidScaling(String),

    /// Output path could not be written.
    #[error("Unable to write {path}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value or structure.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Pixel data does not match the declared width/height.
    #[error("Invalid dimensions: {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
