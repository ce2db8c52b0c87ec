use std::f64::consts::PI;

/// Periodic Hann window of length `len`, as used for spectral analysis
/// (the symmetric window of length `len + 1` with its last point dropped).
pub fn hann(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f64 / len as f64).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_hann_shape() {
        let w = hann(8);
        assert_eq!(w.len(), 8);
        assert!(w[0].abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12);
        // Symmetric about the peak, excluding the first sample.
        for k in 1..4 {
            assert!((w[4 - k] - w[4 + k]).abs() < 1e-12);
        }
    }

    #[test]
    fn energy_of_long_window() {
        // Σw² of a periodic Hann window is 3N/8.
        let w = hann(512);
        let energy: f64 = w.iter().map(|v| v * v).sum();
        assert!((energy - 192.0).abs() < 1e-9);
    }
}
