use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::window::hann;
use crate::error::{NwbError, Result};

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Segment layout of the short-time transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrogramParams {
    /// Samples per segment.
    pub window_length: usize,
    /// Samples shared by consecutive segments.
    pub overlap: usize,
    /// Transform size; segments are zero-padded up to it.
    pub nfft: usize,
}

impl Default for SpectrogramParams {
    /// 512-sample Hann segments, 75% overlap, 1024-point transform.
    fn default() -> Self {
        Self {
            window_length: 512,
            overlap: 384,
            nfft: 1024,
        }
    }
}

impl SpectrogramParams {
    /// Segment length for a signal of `len` samples: a signal shorter than
    /// the window is analysed as a single, shorter segment.
    pub fn segment_length(&self, len: usize) -> usize {
        self.window_length.min(len)
    }

    /// Number of output time bins for a signal of `len` samples.
    pub fn time_bins(&self, len: usize) -> usize {
        let segment = self.segment_length(len);
        if segment == 0 || segment <= self.overlap {
            return 0;
        }
        (len - segment) / (segment - self.overlap) + 1
    }

    /// Number of one-sided frequency bins.
    pub fn frequency_bins(&self) -> usize {
        self.nfft / 2 + 1
    }
}

// ---------------------------------------------------------------------------
// Spectrogram – power over (frequency, time)
// ---------------------------------------------------------------------------

/// One-sided power spectral density per segment, in units²/Hz.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// Bin frequencies in Hz, ascending.
    pub frequencies: Vec<f64>,
    /// Segment centres in seconds, ascending.
    pub times: Vec<f64>,
    /// Row-major: one row of `times.len()` values per frequency.
    power: Vec<f64>,
}

impl Spectrogram {
    /// Power of one frequency bin across all time bins.
    pub fn row(&self, freq_bin: usize) -> &[f64] {
        let width = self.times.len();
        &self.power[freq_bin * width..(freq_bin + 1) * width]
    }
}

/// Compute the power spectrogram of `samples` recorded at `fs` Hz.
///
/// Each segment has its mean removed, is tapered with a periodic Hann window
/// and zero-padded to `nfft`; power is scaled by `1 / (fs · Σw²)` and doubled
/// for every bin except DC and (for even `nfft`) Nyquist.
pub fn compute(samples: &[f64], fs: f64, params: &SpectrogramParams) -> Result<Spectrogram> {
    if samples.is_empty() {
        return Err(NwbError::Value("cannot compute a spectrogram of an empty signal".into()));
    }
    if !(fs.is_finite() && fs > 0.0) {
        return Err(NwbError::Value(format!("invalid sampling rate {fs}")));
    }

    let segment = params.segment_length(samples.len());
    if segment <= params.overlap {
        return Err(NwbError::Value(format!(
            "signal of {} samples is too short for a {}-sample overlap",
            samples.len(),
            params.overlap
        )));
    }
    if params.nfft < segment {
        return Err(NwbError::Value(format!(
            "transform size {} is smaller than the segment length {segment}",
            params.nfft
        )));
    }
    if segment < params.window_length {
        log::warn!(
            "Signal has only {} samples, using a {segment}-sample segment",
            samples.len()
        );
    }

    let step = segment - params.overlap;
    let n_times = params.time_bins(samples.len());
    let n_freqs = params.frequency_bins();
    let nfft = params.nfft;

    let window = hann(segment);
    let scale = 1.0 / (fs * window.iter().map(|w| w * w).sum::<f64>());

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(nfft);
    let mut buffer = vec![Complex::new(0.0, 0.0); nfft];
    let mut power = vec![0.0; n_freqs * n_times];

    for t in 0..n_times {
        let chunk = &samples[t * step..t * step + segment];
        let mean = chunk.iter().sum::<f64>() / segment as f64;

        for (slot, (x, w)) in buffer.iter_mut().zip(chunk.iter().zip(&window)) {
            *slot = Complex::new((x - mean) * w, 0.0);
        }
        for slot in &mut buffer[segment..] {
            *slot = Complex::new(0.0, 0.0);
        }

        fft.process(&mut buffer);

        for (f, bin) in buffer.iter().take(n_freqs).enumerate() {
            let edge = f == 0 || (nfft % 2 == 0 && f == nfft / 2);
            let factor = if edge { 1.0 } else { 2.0 };
            power[f * n_times + t] = bin.norm_sqr() * scale * factor;
        }
    }

    let frequencies = (0..n_freqs).map(|k| k as f64 * fs / nfft as f64).collect();
    let times = (0..n_times)
        .map(|i| (segment as f64 / 2.0 + (i * step) as f64) / fs)
        .collect();

    Ok(Spectrogram {
        frequencies,
        times,
        power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, amplitude: f64, fs: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|n| amplitude * (2.0 * PI * freq * n as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn time_bin_count_follows_segment_layout() {
        let params = SpectrogramParams::default();
        assert_eq!(params.time_bins(10_000), 75);
        assert_eq!(params.time_bins(512), 1);
        assert_eq!(params.time_bins(639), 1);
        assert_eq!(params.time_bins(640), 2);
        // Short signals shrink the segment but keep the overlap.
        assert_eq!(params.time_bins(400), 1);
        assert_eq!(params.time_bins(384), 0);
        assert_eq!(params.frequency_bins(), 513);
    }

    #[test]
    fn axes_match_sampling_rate() {
        let fs = 1000.0;
        let spec = compute(&sine(50.0, 1.0, fs, 10_000), fs, &SpectrogramParams::default()).unwrap();

        assert_eq!(spec.times.len(), 75);
        assert_eq!(spec.frequencies.len(), 513);
        assert!((spec.frequencies[1] - 0.9765625).abs() < 1e-12);
        assert!((spec.frequencies[512] - 500.0).abs() < 1e-12);
        assert!((spec.times[0] - 0.256).abs() < 1e-12);
        assert!((spec.times[1] - 0.384).abs() < 1e-12);
    }

    #[test]
    fn sine_peaks_at_its_frequency() {
        let fs = 1000.0;
        let spec = compute(&sine(50.0, 1.0, fs, 4096), fs, &SpectrogramParams::default()).unwrap();

        for t in 0..spec.times.len() {
            let peak = (0..spec.frequencies.len())
                .max_by(|&a, &b| spec.row(a)[t].total_cmp(&spec.row(b)[t]))
                .unwrap();
            assert!((spec.frequencies[peak] - 50.0).abs() < 1.0);
        }
    }

    #[test]
    fn density_integrates_to_mean_square() {
        let fs = 1000.0;
        let amplitude = 2.0;
        let spec =
            compute(&sine(50.0, amplitude, fs, 2048), fs, &SpectrogramParams::default()).unwrap();
        let df = spec.frequencies[1];

        let total: f64 = (0..spec.frequencies.len()).map(|f| spec.row(f)[0]).sum::<f64>() * df;
        let expected = amplitude * amplitude / 2.0;
        assert!((total - expected).abs() / expected < 0.02, "total = {total}");
    }

    #[test]
    fn constant_signal_is_detrended_away() {
        let spec = compute(&vec![3.5; 2048], 500.0, &SpectrogramParams::default()).unwrap();
        for f in 0..spec.frequencies.len() {
            assert!(spec.row(f).iter().all(|p| p.abs() < 1e-20));
        }
    }

    #[test]
    fn rejects_unusable_input() {
        let params = SpectrogramParams::default();
        assert!(matches!(compute(&[], 1000.0, &params), Err(NwbError::Value(_))));
        assert!(matches!(compute(&[1.0; 1024], 0.0, &params), Err(NwbError::Value(_))));
        assert!(matches!(compute(&[1.0; 1024], f64::NAN, &params), Err(NwbError::Value(_))));
        assert!(matches!(compute(&[1.0; 300], 1000.0, &params), Err(NwbError::Value(_))));
    }
}
