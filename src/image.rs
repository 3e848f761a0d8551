//! Grayscale image buffer shared by the pipeline and the BMP boundary.

use crate::error::{CompressionError, Result};

/// A rectangular grid of 8-bit intensity samples, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    rows: usize,
    cols: usize,
    samples: Vec<u8>,
}

impl GrayImage {
    /// Wraps a row-major sample buffer. The buffer length must be
    /// exactly `rows * cols`.
    pub fn from_raw(rows: usize, cols: usize, samples: Vec<u8>) -> Result<Self> {
        if samples.len() != rows * cols {
            return Err(CompressionError::Decode(format!(
                "sample buffer holds {} bytes, expected {} for a {}x{} image",
                samples.len(),
                rows * cols,
                rows,
                cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            samples,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major sample buffer, `rows * cols` bytes.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn row(&self, r: usize) -> &[u8] {
        &self.samples[r * self.cols..(r + 1) * self.cols]
    }

    /// Copies out the top-left `rows x cols` sub-image. Used by the
    /// pipeline to drop remainder pixels that do not form a full block.
    pub fn truncated(&self, rows: usize, cols: usize) -> Self {
        debug_assert!(rows <= self.rows && cols <= self.cols);
        let mut samples = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            samples.extend_from_slice(&self.row(r)[..cols]);
        }
        Self {
            rows,
            cols,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        assert!(GrayImage::from_raw(2, 3, vec![0; 5]).is_err());
        assert!(GrayImage::from_raw(2, 3, vec![0; 6]).is_ok());
    }

    #[test]
    fn test_truncated_keeps_top_left() {
        let image = GrayImage::from_raw(3, 3, (0..9).collect()).unwrap();
        let cut = image.truncated(2, 2);
        assert_eq!(cut.samples(), &[0, 1, 3, 4]);
    }
}
