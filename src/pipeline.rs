//! Compression pipeline orchestration.
//!
//! Validates parameters, tiles the image, runs the per-block
//! transform/mask/inverse chain and reassembles the result. The
//! pipeline is a pure function of the image and its parameters; no
//! state is carried between blocks.

use crate::dct::TransformBasis;
use crate::error::{CompressionError, Result};
use crate::image::GrayImage;
use crate::mask::apply_frequency_mask;
use crate::tiling::BlockGrid;

/// Caller-supplied compression parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionParameters {
    /// Side length F of the square blocks the image is tiled into.
    pub block_size: usize,
    /// Frequency cutoff d: coefficient (k, l) is kept only when
    /// k + l < d. Valid range is 0..=2F-2.
    pub frequency_threshold: i32,
}

impl CompressionParameters {
    /// Checks both parameters against the image dimensions. Runs
    /// before any computation; an out-of-domain value aborts the whole
    /// compression call.
    pub fn validate(&self, rows: usize, cols: usize) -> Result<()> {
        if self.block_size == 0 || self.block_size > rows || self.block_size > cols {
            return Err(CompressionError::InvalidBlockSize {
                block_size: self.block_size,
                rows,
                cols,
            });
        }
        let max = 2 * self.block_size as i64 - 2;
        if self.frequency_threshold < 0 || self.frequency_threshold as i64 > max {
            return Err(CompressionError::InvalidFrequencyThreshold {
                threshold: self.frequency_threshold,
                max,
            });
        }
        Ok(())
    }
}

/// Rounds a reconstructed intensity to the nearest integer (ties away
/// from zero, the `f64::round` rule), clamps into [0, 255] and narrows
/// to an 8-bit sample.
fn reconstruct_sample(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Runs the transform/mask/inverse chain on one extracted block.
fn process_block(basis: &TransformBasis, threshold: i32, block: &[f64]) -> Vec<u8> {
    let coefficients = basis.forward_2d(block);
    let masked = apply_frequency_mask(&coefficients, basis.size(), threshold);
    let restored = basis.inverse_2d(&masked);
    restored.iter().map(|&v| reconstruct_sample(v)).collect()
}

/// Compresses a grayscale image with block-based DCT coding.
///
/// The image is tiled into `block_size x block_size` blocks (remainder
/// rows and columns are dropped), each block is transformed, its high
/// frequencies are cut at `frequency_threshold`, and the truncated
/// spectrum is inverted, rounded and clamped. The output image has
/// dimensions `(rows / F) * F` by `(cols / F) * F`.
pub fn compress(image: &GrayImage, parameters: &CompressionParameters) -> Result<GrayImage> {
    parameters.validate(image.rows(), image.cols())?;

    let grid = BlockGrid::new(image.rows(), image.cols(), parameters.block_size);
    let basis = TransformBasis::new(parameters.block_size);
    let threshold = parameters.frequency_threshold;

    let blocks = reconstruct_blocks(image, &grid, &basis, threshold);

    let mut output = vec![0u8; grid.truncated_rows() * grid.truncated_cols()];
    for (index, block) in blocks.iter().enumerate() {
        grid.place(&mut output, index, block);
    }
    GrayImage::from_raw(grid.truncated_rows(), grid.truncated_cols(), output)
}

/// Parallel per-block processing. Blocks have no data dependency on
/// each other; workers share only the read-only basis and the source
/// image.
#[cfg(feature = "parallel")]
fn reconstruct_blocks(
    image: &GrayImage,
    grid: &BlockGrid,
    basis: &TransformBasis,
    threshold: i32,
) -> Vec<Vec<u8>> {
    use rayon::prelude::*;

    (0..grid.block_count())
        .into_par_iter()
        .map(|index| process_block(basis, threshold, &grid.extract(image, index)))
        .collect()
}

/// Serial fallback when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
fn reconstruct_blocks(
    image: &GrayImage,
    grid: &BlockGrid,
    basis: &TransformBasis,
    threshold: i32,
) -> Vec<Vec<u8>> {
    (0..grid.block_count())
        .map(|index| process_block(basis, threshold, &grid.extract(image, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_image(rows: usize, cols: usize) -> GrayImage {
        let samples = (0..rows * cols).map(|i| ((i * 7 + 3) % 256) as u8).collect();
        GrayImage::from_raw(rows, cols, samples).unwrap()
    }

    #[test]
    fn test_validate_rejects_block_size_boundaries() {
        let zero = CompressionParameters {
            block_size: 0,
            frequency_threshold: 0,
        };
        assert!(matches!(
            zero.validate(16, 16),
            Err(CompressionError::InvalidBlockSize { .. })
        ));

        let too_tall = CompressionParameters {
            block_size: 17,
            frequency_threshold: 0,
        };
        assert!(matches!(
            too_tall.validate(16, 32),
            Err(CompressionError::InvalidBlockSize { .. })
        ));
        assert!(matches!(
            too_tall.validate(32, 16),
            Err(CompressionError::InvalidBlockSize { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_threshold_boundaries() {
        let negative = CompressionParameters {
            block_size: 8,
            frequency_threshold: -1,
        };
        assert!(matches!(
            negative.validate(16, 16),
            Err(CompressionError::InvalidFrequencyThreshold { .. })
        ));

        // 2F-1 is one past the maximum 2F-2.
        let too_high = CompressionParameters {
            block_size: 8,
            frequency_threshold: 15,
        };
        assert!(matches!(
            too_high.validate(16, 16),
            Err(CompressionError::InvalidFrequencyThreshold { .. })
        ));

        let at_max = CompressionParameters {
            block_size: 8,
            frequency_threshold: 14,
        };
        assert!(at_max.validate(16, 16).is_ok());
    }

    #[test]
    fn test_output_dimensions_follow_truncation_law() {
        let image = ramp_image(19, 26);
        let parameters = CompressionParameters {
            block_size: 8,
            frequency_threshold: 8,
        };
        let output = compress(&image, &parameters).unwrap();
        assert_eq!(output.rows(), 16);
        assert_eq!(output.cols(), 24);
    }

    #[test]
    fn test_max_threshold_approximates_input() {
        // d = 2F-2 keeps everything but the corner coefficient. A
        // linear gradient has no energy in that coefficient, so the
        // reconstruction differs from the source by rounding only.
        let samples = (0..16usize * 16)
            .map(|i| (5 * (i / 16) + 3 * (i % 16)) as u8)
            .collect();
        let image = GrayImage::from_raw(16, 16, samples).unwrap();
        let parameters = CompressionParameters {
            block_size: 8,
            frequency_threshold: 14,
        };
        let output = compress(&image, &parameters).unwrap();
        for (o, s) in output.samples().iter().zip(image.samples()) {
            assert!((*o as i16 - *s as i16).abs() <= 1);
        }
    }

    #[test]
    fn test_zero_threshold_blacks_out_image() {
        let image = ramp_image(16, 16);
        let parameters = CompressionParameters {
            block_size: 8,
            frequency_threshold: 0,
        };
        let output = compress(&image, &parameters).unwrap();
        assert!(output.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_compress_is_deterministic() {
        let image = ramp_image(24, 24);
        let parameters = CompressionParameters {
            block_size: 8,
            frequency_threshold: 6,
        };
        let first = compress(&image, &parameters).unwrap();
        let second = compress(&image, &parameters).unwrap();
        assert_eq!(first.samples(), second.samples());
    }
}
