use std::path::PathBuf;

use crate::config::SpectrogramConfig;
use crate::data::loader::NwbFile;
use crate::data::model::{FrequencyRange, SignalStream};
use crate::dsp::spectrogram::{compute, SpectrogramParams};
use crate::error::{NwbError, Result};
use crate::render::SpectrogramRaster;

// ---------------------------------------------------------------------------
// Request / targets
// ---------------------------------------------------------------------------

/// Which file, stream and band to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramRequest {
    pub path: PathBuf,
    pub stream: String,
    pub range: FrequencyRange,
    /// Column of a (time, channel) signal.
    pub channel: usize,
    pub max_width: usize,
}

impl SpectrogramRequest {
    pub fn from_config(path: PathBuf, config: &SpectrogramConfig) -> Self {
        Self {
            path,
            stream: config.stream.clone(),
            range: FrequencyRange::new(config.freq_low, config.freq_high),
            channel: config.channel,
            max_width: config.max_width,
        }
    }

    pub fn title(&self) -> String {
        format!("LFP Spectrogram - Area: {}", self.stream)
    }
}

/// Where a finished spectrogram goes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderTargets {
    /// Open an interactive viewer window and block until it is closed.
    pub window: bool,
    pub png: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Pipeline: validate → load → compute → raster
// ---------------------------------------------------------------------------

/// Check a loaded signal and return its sampling rate.
pub fn validate_signal(signal: &SignalStream) -> Result<f64> {
    if signal.is_empty() {
        return Err(NwbError::Value("LFP data is empty.".into()));
    }
    match signal.rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => Err(NwbError::Value(
            "Invalid sampling rate found in the NWB file.".into(),
        )),
    }
}

/// Load the requested stream and turn it into a drawable raster.
///
/// The file is closed as soon as the signal is in memory, whichever way the
/// load ends.
pub fn create_lfp_spectrogram(request: &SpectrogramRequest) -> Result<SpectrogramRaster> {
    let signal = {
        let file = NwbFile::open(&request.path)?;
        let signal = file.load_signal(&request.stream, request.channel)?;
        log::debug!("Closing {}", file.path().display());
        signal
    };
    let rate = validate_signal(&signal)?;
    let non_finite = signal.samples.iter().filter(|x| !x.is_finite()).count();
    if non_finite > 0 {
        log::warn!(
            "'{}' has {non_finite} non-finite samples; affected cells are left blank",
            signal.name
        );
    }

    let range = request.range;
    if !(range.low < range.high) {
        return Err(NwbError::Value(format!(
            "invalid frequency range ({}, {})",
            range.low, range.high
        )));
    }

    let params = SpectrogramParams::default();
    let spec = compute(&signal.samples, rate, &params)?;
    log::info!(
        "Computed spectrogram of '{}': {} samples at {rate} Hz, {} time x {} frequency bins",
        signal.name,
        signal.len(),
        spec.times.len(),
        spec.frequencies.len()
    );

    SpectrogramRaster::from_spectrogram(&spec, range, request.max_width, request.title())
}

/// Build the spectrogram and send it to `targets`.
///
/// Nothing escapes this function: every failure is logged and the call simply
/// returns.
pub fn show_lfp_spectrogram(request: &SpectrogramRequest, targets: &RenderTargets) {
    let result = create_lfp_spectrogram(request).and_then(|raster| render(raster, targets));
    if let Err(e) = result {
        log::error!("An error occurred: {e}");
    }
}

fn render(raster: SpectrogramRaster, targets: &RenderTargets) -> Result<()> {
    if let Some(path) = &targets.png {
        if raster.is_empty() {
            log::warn!("Nothing to draw, not writing {}", path.display());
        } else {
            raster.save_png(path)?;
        }
    }
    if targets.window {
        crate::app::show(raster)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_nwb, AcquisitionFixture, NwbFixture, RateFixture};
    use std::path::Path;

    fn request(path: &Path, stream: &str) -> SpectrogramRequest {
        SpectrogramRequest {
            stream: stream.to_string(),
            ..SpectrogramRequest::from_config(path.to_path_buf(), &SpectrogramConfig::default())
        }
    }

    fn lfp(samples: Vec<f64>, rate: RateFixture) -> NwbFixture {
        NwbFixture {
            acquisitions: vec![AcquisitionFixture {
                rate,
                ..AcquisitionFixture::new("LFP", samples, 0.0)
            }],
            ..NwbFixture::default()
        }
    }

    fn noise(len: usize) -> Vec<f64> {
        (0..len).map(|n| ((n * 7919) % 113) as f64 / 113.0 - 0.5).collect()
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_lfp_spectrogram(&request(&dir.path().join("none.nwb"), "LFP")).unwrap_err();
        assert!(matches!(err, NwbError::NotFound(_)));
    }

    #[test]
    fn unknown_stream_is_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rat.nwb");
        write_nwb(&path, &lfp(noise(2048), RateFixture::Number(1000.0))).unwrap();

        let err = create_lfp_spectrogram(&request(&path, "Raw")).unwrap_err();
        assert!(matches!(err, NwbError::MissingKey(name) if name == "Raw"));

        // The handle was released: the file can be recreated right away.
        write_nwb(&path, &NwbFixture::default()).unwrap();
    }

    #[test]
    fn empty_signal_is_a_value_error() {
        let signal = SignalStream {
            name: "LFP".into(),
            samples: Vec::new(),
            rate: Some(1000.0),
        };
        let err = validate_signal(&signal).unwrap_err();
        assert_eq!(err.to_string(), "LFP data is empty.");
    }

    #[test]
    fn bad_rates_are_value_errors() {
        for rate in [Some(0.0), Some(-250.0), Some(f64::NAN), Some(f64::INFINITY), None] {
            let signal = SignalStream {
                name: "LFP".into(),
                samples: vec![1.0; 16],
                rate,
            };
            assert!(matches!(validate_signal(&signal), Err(NwbError::Value(_))));
        }
    }

    #[test]
    fn rate_stored_as_text_or_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        for (name, rate) in [("text.nwb", RateFixture::Text("1kHz")), ("none.nwb", RateFixture::Missing)] {
            let path = dir.path().join(name);
            write_nwb(&path, &lfp(noise(2048), rate)).unwrap();
            let err = create_lfp_spectrogram(&request(&path, "LFP")).unwrap_err();
            assert!(matches!(err, NwbError::Value(_)), "{name}: {err}");
        }
    }

    #[test]
    fn negative_rate_in_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neg.nwb");
        write_nwb(&path, &lfp(noise(2048), RateFixture::Number(-1.0))).unwrap();
        let err = create_lfp_spectrogram(&request(&path, "LFP")).unwrap_err();
        assert!(matches!(err, NwbError::Value(_)));
    }

    #[test]
    fn valid_stream_produces_a_clipped_raster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rat.nwb");
        write_nwb(&path, &lfp(noise(5000), RateFixture::Number(1000.0))).unwrap();

        let raster = create_lfp_spectrogram(&request(&path, "LFP")).unwrap();
        assert_eq!(raster.width, 36);
        assert_eq!(raster.title, "LFP Spectrogram - Area: LFP");
        // 1..=100 Hz at 1000/1024 Hz spacing: bins 2 through 102.
        assert_eq!(raster.height, 101);
    }

    #[test]
    fn narrow_band_still_produces_a_raster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rat.nwb");
        write_nwb(&path, &lfp(noise(4096), RateFixture::Number(1000.0))).unwrap();

        let narrow = SpectrogramRequest {
            range: FrequencyRange::new(1.0, 1.5),
            ..request(&path, "LFP")
        };
        assert_eq!(create_lfp_spectrogram(&narrow).unwrap().height, 2);

        // 100 Hz sampling puts Nyquist at 50 Hz.
        write_nwb(&path, &lfp(noise(4096), RateFixture::Number(100.0))).unwrap();
        let above = SpectrogramRequest {
            range: FrequencyRange::new(60.0, 100.0),
            ..request(&path, "LFP")
        };
        let raster = create_lfp_spectrogram(&above).unwrap();
        assert!(raster.is_empty());
        assert_eq!(raster.freq_bounds, (60.0, 100.0));
    }

    #[test]
    fn show_writes_png_and_swallows_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rat.nwb");
        write_nwb(&path, &lfp(noise(4096), RateFixture::Number(500.0))).unwrap();

        let png = dir.path().join("out.png");
        let targets = RenderTargets { window: false, png: Some(png.clone()) };
        show_lfp_spectrogram(&request(&path, "LFP"), &targets);
        assert!(png.exists());

        let missing_png = dir.path().join("missing.png");
        let targets = RenderTargets { window: false, png: Some(missing_png.clone()) };
        show_lfp_spectrogram(&request(&dir.path().join("absent.nwb"), "LFP"), &targets);
        assert!(!missing_png.exists());
    }
}
