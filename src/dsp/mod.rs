/// Spectral analysis: windowing and the short-time power spectrum.
///
/// ```text
///   samples, fs
///        │
///        ▼
///   ┌───────────┐
///   │  window    │  periodic Hann taper
///   └───────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ spectrogram  │  detrend → taper → FFT → one-sided PSD per segment
///   └─────────────┘
/// ```

pub mod spectrogram;
pub mod window;
