use eframe::egui::{Ui, Vec2};
use egui_plot::{Plot, PlotImage, PlotPoint};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Spectrogram plot (central panel)
// ---------------------------------------------------------------------------

/// Render the spectrogram in the central panel, placed at its time and
/// frequency extents.
pub fn spectrogram_plot(ui: &mut Ui, state: &ViewerState) {
    let raster = &state.raster;
    let (t0, t1) = raster.time_bounds;
    let (f0, f1) = raster.freq_bounds;

    // An empty raster still gets its axes.
    let image = match &state.texture {
        Some(texture) => Some(PlotImage::new(
            texture.id(),
            PlotPoint::new((t0 + t1) / 2.0, (f0 + f1) / 2.0),
            Vec2::new((t1 - t0) as f32, (f1 - f0) as f32),
        )),
        None if raster.is_empty() => None,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.spinner();
            });
            return;
        }
    };

    Plot::new("spectrogram_plot")
        .x_axis_label("Time (s)")
        .y_axis_label("Frequency (Hz)")
        .include_x(t0)
        .include_x(t1)
        .include_y(raster.range.low)
        .include_y(raster.range.high)
        .label_formatter(|_name, value| format!("{:.2} s\n{:.1} Hz", value.x, value.y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(image) = image {
                plot_ui.image(image);
            }
        });
}
