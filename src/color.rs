use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Viridis ramp
// ---------------------------------------------------------------------------

/// Evenly spaced samples of the viridis colour map, dark to bright.
const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

fn stop(i: usize) -> LinSrgb {
    let (r, g, b) = VIRIDIS[i];
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Colour at position `t` in `[0, 1]`, interpolated in linear RGB.
pub fn viridis(t: f32) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (VIRIDIS.len() - 1) as f32;
    let lower = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = pos - lower as f32;

    let mixed = stop(lower).mix(stop(lower + 1), frac);
    let rgb = Srgb::<f32>::from_linear(mixed).into_format::<u8>();
    [rgb.red, rgb.green, rgb.blue]
}

// ---------------------------------------------------------------------------
// ColorScale: value range → colour
// ---------------------------------------------------------------------------

/// Maps values in `[min, max]` onto the viridis ramp; values outside the
/// range saturate at the ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` within the scale, in `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if !span.is_finite() || span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    pub fn rgb(&self, value: f64) -> [u8; 3] {
        viridis(self.normalize(value))
    }

    pub fn color32(&self, value: f64) -> Color32 {
        let [r, g, b] = self.rgb(value);
        Color32::from_rgb(r, g, b)
    }
}
