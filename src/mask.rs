//! Frequency-domain coefficient masking.

/// Zeroes every coefficient whose frequency-index sum `k + l` is at or
/// above `threshold`, keeping a triangular band of low frequencies.
///
/// The inequality is strict: a threshold of 0 zeroes every coefficient
/// including the DC term, and `2 * n - 2` zeroes only the single
/// highest-frequency corner coefficient.
pub fn apply_frequency_mask(coefficients: &[f64], n: usize, threshold: i32) -> Vec<f64> {
    debug_assert_eq!(coefficients.len(), n * n);
    let mut masked = vec![0.0f64; n * n];
    for k in 0..n {
        for l in 0..n {
            if ((k + l) as i64) < threshold as i64 {
                masked[k * n + l] = coefficients[k * n + l];
            }
        }
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_threshold_zeroes_dc() {
        let coefficients = vec![1.0; 16];
        let masked = apply_frequency_mask(&coefficients, 4, 0);
        assert!(masked.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_max_threshold_drops_only_corner() {
        let n = 4;
        let coefficients = vec![1.0; n * n];
        let masked = apply_frequency_mask(&coefficients, n, (2 * n - 2) as i32);
        for k in 0..n {
            for l in 0..n {
                let expected = if k == n - 1 && l == n - 1 { 0.0 } else { 1.0 };
                assert_eq!(masked[k * n + l], expected, "at ({}, {})", k, l);
            }
        }
    }

    #[test]
    fn test_band_is_triangular() {
        let n = 4;
        let coefficients: Vec<f64> = (1..=16).map(|v| v as f64).collect();
        let masked = apply_frequency_mask(&coefficients, n, 2);
        for k in 0..n {
            for l in 0..n {
                if k + l < 2 {
                    assert_eq!(masked[k * n + l], coefficients[k * n + l]);
                } else {
                    assert_eq!(masked[k * n + l], 0.0);
                }
            }
        }
    }
}
