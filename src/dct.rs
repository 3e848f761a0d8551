//! Discrete Cosine Transform (DCT) over square blocks.
//!
//! Direct matrix formulation: the orthonormal DCT-II basis is built
//! once per block size and applied separably, so the forward 2D
//! transform is `D * X * D^T` and the inverse is `D^T * C * D`.

use std::f64::consts::PI;

/// Orthonormal DCT-II basis matrix for one block size.
///
/// `D[l][j] = alpha_l * cos(l * pi * (2j + 1) / (2n))` with
/// `alpha_0 = 1/sqrt(n)` and `alpha_l = sqrt(2/n)` for `l >= 1`.
/// The matrix is orthogonal, so its transpose is the DCT-III (inverse)
/// basis. Built once per pipeline invocation and shared read-only
/// across blocks.
pub struct TransformBasis {
    size: usize,
    d: Vec<f64>,
    dt: Vec<f64>,
}

impl TransformBasis {
    /// Builds the `n x n` basis. `n` must be positive; the pipeline
    /// validates block size before constructing a basis.
    pub fn new(n: usize) -> Self {
        debug_assert!(n > 0);
        let mut d = vec![0.0f64; n * n];
        let alpha0 = 1.0 / (n as f64).sqrt();
        let alpha = (2.0 / n as f64).sqrt();
        for l in 0..n {
            let a = if l == 0 { alpha0 } else { alpha };
            for j in 0..n {
                let angle = l as f64 * PI * (2 * j + 1) as f64 / (2 * n) as f64;
                d[l * n + j] = a * angle.cos();
            }
        }
        let mut dt = vec![0.0f64; n * n];
        for l in 0..n {
            for j in 0..n {
                dt[j * n + l] = d[l * n + j];
            }
        }
        Self { size: n, d, dt }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// 1D DCT-II of a length-`n` vector: `D * x`.
    pub fn forward_1d(&self, input: &[f64]) -> Vec<f64> {
        let n = self.size;
        debug_assert_eq!(input.len(), n);
        let mut output = vec![0.0f64; n];
        for l in 0..n {
            let mut sum = 0.0;
            for j in 0..n {
                sum += self.d[l * n + j] * input[j];
            }
            output[l] = sum;
        }
        output
    }

    /// 2D DCT-II of a row-major `n x n` block: `D * X * D^T`.
    pub fn forward_2d(&self, block: &[f64]) -> Vec<f64> {
        let columns = self.mat_mul(&self.d, block);
        self.mat_mul(&columns, &self.dt)
    }

    /// 2D DCT-III (inverse) of a row-major `n x n` coefficient matrix:
    /// `D^T * C * D`. Exact algebraic inverse of [`Self::forward_2d`]
    /// up to floating-point error.
    pub fn inverse_2d(&self, coefficients: &[f64]) -> Vec<f64> {
        let columns = self.mat_mul(&self.dt, coefficients);
        self.mat_mul(&columns, &self.d)
    }

    fn mat_mul(&self, a: &[f64], b: &[f64]) -> Vec<f64> {
        let n = self.size;
        debug_assert_eq!(a.len(), n * n);
        debug_assert_eq!(b.len(), n * n);
        let mut out = vec![0.0f64; n * n];
        for i in 0..n {
            for k in 0..n {
                let aik = a[i * n + k];
                for j in 0..n {
                    out[i * n + j] += aik * b[k * n + j];
                }
            }
        }
        out
    }
}
