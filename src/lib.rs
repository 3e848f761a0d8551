//! # graydct-rs
//!
//! Lossy grayscale image compression with block-based two-dimensional
//! DCT coding: the image is tiled into fixed-size blocks, each block
//! is transformed into frequency space with the orthonormal DCT-II,
//! coefficients above a diagonal frequency-sum threshold are dropped,
//! and the truncated spectrum is inverted to reconstruct the block.
//!
//! ## Example
//!
//! ```rust
//! use graydct_rs::{compress, CompressionParameters, GrayImage};
//!
//! let samples = vec![128u8; 16 * 16];
//! let image = GrayImage::from_raw(16, 16, samples).unwrap();
//! let parameters = CompressionParameters {
//!     block_size: 8,
//!     frequency_threshold: 10,
//! };
//! let output = compress(&image, &parameters).unwrap();
//! assert_eq!((output.rows(), output.cols()), (16, 16));
//! ```

#![forbid(unsafe_code)]

pub mod bmp;
pub mod dct;
pub mod error;
pub mod image;
pub mod mask;
pub mod pipeline;
pub mod tiling;

pub use dct::TransformBasis;
pub use error::{CompressionError, Result};
pub use image::GrayImage;
pub use pipeline::{compress, CompressionParameters};
pub use tiling::BlockGrid;
