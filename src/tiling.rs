//! Block decomposition and reassembly.
//!
//! An image is tiled into non-overlapping `block_size x block_size`
//! squares in row-major block order. Remainder rows and columns that
//! do not form a complete block are dropped, not padded.

use crate::image::GrayImage;

/// Geometry of the block tiling for one (image, block size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    block_size: usize,
    blocks_per_row: usize,
    blocks_per_col: usize,
}

impl BlockGrid {
    /// Computes the grid covering the top-left part of a `rows x cols`
    /// image. Block size must already be validated against the image
    /// dimensions.
    pub fn new(rows: usize, cols: usize, block_size: usize) -> Self {
        debug_assert!(block_size > 0 && block_size <= rows && block_size <= cols);
        Self {
            block_size,
            blocks_per_row: rows / block_size,
            blocks_per_col: cols / block_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of block rows (vertical block count).
    pub fn blocks_per_row(&self) -> usize {
        self.blocks_per_row
    }

    /// Number of block columns (horizontal block count).
    pub fn blocks_per_col(&self) -> usize {
        self.blocks_per_col
    }

    pub fn block_count(&self) -> usize {
        self.blocks_per_row * self.blocks_per_col
    }

    /// Height of the truncated image covered by complete blocks.
    pub fn truncated_rows(&self) -> usize {
        self.blocks_per_row * self.block_size
    }

    /// Width of the truncated image covered by complete blocks.
    pub fn truncated_cols(&self) -> usize {
        self.blocks_per_col * self.block_size
    }

    /// Block-grid coordinates of the `index`-th block in row-major
    /// block order.
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.block_count());
        (index / self.blocks_per_col, index % self.blocks_per_col)
    }

    /// Copies block `index` out of the source image as a row-major
    /// `block_size x block_size` matrix of real-valued intensities.
    pub fn extract(&self, image: &GrayImage, index: usize) -> Vec<f64> {
        let f = self.block_size;
        let (block_row, block_col) = self.coordinates(index);
        let mut block = Vec::with_capacity(f * f);
        for r in 0..f {
            let row = image.row(block_row * f + r);
            block.extend(
                row[block_col * f..(block_col + 1) * f]
                    .iter()
                    .map(|&s| s as f64),
            );
        }
        block
    }

    /// Writes a reconstructed block into its slot of the truncated
    /// output buffer (`truncated_rows() * truncated_cols()` bytes,
    /// row-major).
    pub fn place(&self, output: &mut [u8], index: usize, block: &[u8]) {
        let f = self.block_size;
        debug_assert_eq!(block.len(), f * f);
        debug_assert_eq!(output.len(), self.truncated_rows() * self.truncated_cols());
        let (block_row, block_col) = self.coordinates(index);
        let stride = self.truncated_cols();
        for r in 0..f {
            let start = (block_row * f + r) * stride + block_col * f;
            output[start..start + f].copy_from_slice(&block[r * f..(r + 1) * f]);
        }
    }
}
