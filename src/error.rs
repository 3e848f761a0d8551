use thiserror::Error;

/// Errors produced by the compression pipeline and the BMP boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    #[error("Invalid block size {block_size} for a {rows}x{cols} image: block size must be positive and no larger than either image dimension")]
    InvalidBlockSize {
        block_size: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Invalid frequency threshold {threshold}: must be in 0..={max} (2 * block_size - 2)")]
    InvalidFrequencyThreshold { threshold: i32, max: i64 },
    #[error("Failed to decode BMP: {0}")]
    Decode(String),
    #[error("Failed to encode BMP: {0}")]
    Encode(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CompressionError>;
