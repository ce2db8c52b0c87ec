use eframe::egui;

use crate::error::{NwbError, Result};
use crate::render::SpectrogramRaster;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpectrogramApp {
    pub state: ViewerState,
}

impl SpectrogramApp {
    pub fn new(raster: SpectrogramRaster) -> Self {
        Self {
            state: ViewerState::new(raster),
        }
    }
}

impl eframe::App for SpectrogramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.ensure_textures(ctx);

        // ---- Top panel: menu bar and title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: colour bar ----
        egui::SidePanel::right("color_bar")
            .default_width(110.0)
            .resizable(false)
            .show(ctx, |ui| {
                panels::color_bar(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectrogram_plot(ui, &self.state);
        });
    }
}

/// Open a window showing `raster` and block until the user closes it.
pub fn show(raster: SpectrogramRaster) -> Result<()> {
    let title = raster.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([500.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(SpectrogramApp::new(raster)))),
    )
    .map_err(|e| NwbError::Render(e.to_string()))
}
