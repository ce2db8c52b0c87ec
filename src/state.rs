use std::path::Path;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::color::{viridis, ColorScale};
use crate::render::SpectrogramRaster;

/// Pixel height of the colour bar gradient texture.
const COLOR_BAR_STEPS: usize = 256;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the viewer window shows, independent of rendering.
pub struct ViewerState {
    pub raster: SpectrogramRaster,

    /// Spectrogram uploaded to the GPU (created on the first frame).
    pub texture: Option<TextureHandle>,

    /// Vertical viridis gradient for the colour bar.
    pub color_bar: Option<TextureHandle>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(raster: SpectrogramRaster) -> Self {
        Self {
            raster,
            texture: None,
            color_bar: None,
            status_message: None,
        }
    }

    /// Upload the spectrogram and colour bar textures if not done yet. An
    /// empty raster gets no spectrogram texture.
    pub fn ensure_textures(&mut self, ctx: &egui::Context) {
        if self.texture.is_none() && !self.raster.is_empty() {
            let image = ColorImage::from_rgba_unmultiplied(
                [self.raster.width, self.raster.height],
                &self.raster.rgba(),
            );
            self.texture = Some(ctx.load_texture("spectrogram", image, TextureOptions::NEAREST));
        }
        if self.color_bar.is_none() {
            let image = ColorImage::from_rgba_unmultiplied([1, COLOR_BAR_STEPS], &color_bar_rgba());
            self.color_bar = Some(ctx.load_texture("color_bar", image, TextureOptions::LINEAR));
        }
    }

    /// Write the raster to `path`, reporting the outcome in the status line.
    pub fn save_image(&mut self, path: &Path) {
        match self.raster.save_png(path) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to save image: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

/// Gradient pixels, brightest (highest power) at the top.
fn color_bar_rgba() -> Vec<u8> {
    (0..COLOR_BAR_STEPS)
        .rev()
        .flat_map(|i| {
            let [r, g, b] = viridis(i as f32 / (COLOR_BAR_STEPS - 1) as f32);
            [r, g, b, 255]
        })
        .collect()
}

/// `count` evenly spaced tick values from the bottom to the top of `scale`.
pub fn color_bar_ticks(scale: &ColorScale, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![(scale.min + scale.max) / 2.0],
        _ => (0..count)
            .map(|i| scale.min + (scale.max - scale.min) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}
