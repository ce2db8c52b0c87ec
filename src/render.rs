use std::path::Path;

use crate::color::ColorScale;
use crate::data::model::FrequencyRange;
use crate::dsp::spectrogram::Spectrogram;
use crate::error::{NwbError, Result};

/// Power below this is drawn as if it were this, keeping `log10` finite.
const POWER_FLOOR: f64 = 1e-30;

/// `10 · log10(power)`, with zero power clamped to the floor. NaN stays NaN
/// and is drawn as a transparent cell.
pub fn to_decibels(power: f64) -> f64 {
    if power.is_nan() {
        return f64::NAN;
    }
    10.0 * power.max(POWER_FLOOR).log10()
}

// ---------------------------------------------------------------------------
// SpectrogramRaster – what gets drawn
// ---------------------------------------------------------------------------

/// A spectrogram reduced to what the viewer and the PNG export draw: the
/// frequency rows inside the requested range, at most `max_width` time
/// columns, in decibels.
#[derive(Debug, Clone)]
pub struct SpectrogramRaster {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Row-major dB values; row 0 is the lowest frequency.
    pub decibels: Vec<f64>,
    /// Outer edges of the first and last time cells, in seconds.
    pub time_bounds: (f64, f64),
    /// Outer edges of the lowest and highest frequency cells, in Hz.
    pub freq_bounds: (f64, f64),
    /// The band the frequency axis is clipped to.
    pub range: FrequencyRange,
    pub scale: ColorScale,
}

impl SpectrogramRaster {
    /// Clip `spec` to `range`, average neighbouring time bins down to at most
    /// `max_width` columns and convert to decibels.
    pub fn from_spectrogram(
        spec: &Spectrogram,
        range: FrequencyRange,
        max_width: usize,
        title: impl Into<String>,
    ) -> Result<Self> {
        let df = spec.frequencies.get(1).map_or(1.0, |f| f - spec.frequencies[0]);
        let rows = frequency_rows(&spec.frequencies, df, range);
        if rows.is_empty() {
            log::warn!(
                "No frequency bins between {} and {} Hz (highest bin is {} Hz)",
                range.low,
                range.high,
                spec.frequencies.last().copied().unwrap_or(0.0)
            );
        }

        let n_times = spec.times.len();
        if n_times == 0 {
            return Err(NwbError::Value("spectrogram has no time bins".into()));
        }
        let width = n_times.min(max_width.max(1));
        let height = rows.len();

        let mut decibels = Vec::with_capacity(width * height);
        for &row in &rows {
            let power = spec.row(row);
            for col in 0..width {
                let start = col * n_times / width;
                let end = ((col + 1) * n_times / width).max(start + 1);
                let mean = power[start..end].iter().sum::<f64>() / (end - start) as f64;
                decibels.push(to_decibels(mean));
            }
        }

        let floor_db = to_decibels(0.0);
        let (min, max) = decibels
            .iter()
            .filter(|&&db| db > floor_db)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &db| {
                (lo.min(db), hi.max(db))
            });
        let scale = if min.is_finite() {
            ColorScale::new(min, max)
        } else {
            ColorScale::new(floor_db, floor_db)
        };

        let dt = if n_times > 1 {
            spec.times[1] - spec.times[0]
        } else {
            2.0 * spec.times[0]
        };
        let freq_bounds = match (rows.first(), rows.last()) {
            (Some(&first), Some(&last)) => (
                spec.frequencies[first] - df / 2.0,
                spec.frequencies[last] + df / 2.0,
            ),
            _ => (range.low, range.high),
        };

        Ok(Self {
            title: title.into(),
            width,
            height,
            decibels,
            time_bounds: (spec.times[0] - dt / 2.0, spec.times[n_times - 1] + dt / 2.0),
            freq_bounds,
            range,
            scale,
        })
    }

    /// True when no frequency row falls in the requested band; only the axes
    /// are drawn then.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn decibel(&self, row: usize, col: usize) -> f64 {
        self.decibels[row * self.width + col]
    }

    /// RGBA pixels in image order: the first pixel row is the highest
    /// frequency.
    pub fn rgba(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.width * self.height * 4);
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let db = self.decibel(row, col);
                if db.is_nan() {
                    pixels.extend_from_slice(&[0, 0, 0, 0]);
                } else {
                    let [r, g, b] = self.scale.rgb(db);
                    pixels.extend_from_slice(&[r, g, b, 255]);
                }
            }
        }
        pixels
    }

    /// Write the colour-mapped raster as an image; the format follows the
    /// file extension.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(NwbError::Render(format!(
                "no frequency bins between {} and {} Hz to draw",
                self.range.low, self.range.high
            )));
        }
        let image = image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.rgba())
            .ok_or_else(|| NwbError::Render("pixel buffer does not match image size".into()))?;
        image.save(path)?;
        log::info!(
            "Saved {}x{} spectrogram image to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

/// Indices of the bins centred inside `range`. A band narrower than the bin
/// spacing keeps the bins whose cells (centre ± df/2) overlap it instead.
fn frequency_rows(frequencies: &[f64], df: f64, range: FrequencyRange) -> Vec<usize> {
    let centred: Vec<usize> = frequencies
        .iter()
        .enumerate()
        .filter(|(_, f)| range.contains(**f))
        .map(|(i, _)| i)
        .collect();
    if !centred.is_empty() {
        return centred;
    }
    frequencies
        .iter()
        .enumerate()
        .filter(|(_, f)| **f - df / 2.0 < range.high && **f + df / 2.0 > range.low)
        .map(|(i, _)| i)
        .collect()
}
