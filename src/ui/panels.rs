use eframe::egui::{self, pos2, Align2, Color32, FontId, Rect, RichText, Sense, Stroke, Ui, Vec2};

use crate::state::{color_bar_ticks, ViewerState};

const BAR_WIDTH: f32 = 18.0;
const TICK_COUNT: usize = 6;

// ---------------------------------------------------------------------------
// Right side panel – colour bar
// ---------------------------------------------------------------------------

/// Render the colour bar with its dB tick labels.
pub fn color_bar(ui: &mut Ui, state: &ViewerState) {
    ui.add_space(4.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("Power/Frequency\n(dB/Hz)").small());
    });
    ui.add_space(8.0);

    let Some(texture) = &state.color_bar else {
        return;
    };

    let size = Vec2::new(ui.available_width(), (ui.available_height() - 16.0).max(60.0));
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let bar = Rect::from_min_size(rect.min + Vec2::new(8.0, 0.0), Vec2::new(BAR_WIDTH, rect.height()));

    let painter = ui.painter();
    let text_color = ui.visuals().text_color();
    painter.image(
        texture.id(),
        bar,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    let scale = &state.raster.scale;
    for value in color_bar_ticks(scale, TICK_COUNT) {
        let y = bar.bottom() - scale.normalize(value) * bar.height();
        painter.line_segment(
            [pos2(bar.right(), y), pos2(bar.right() + 4.0, y)],
            Stroke::new(1.0, text_color),
        );
        painter.text(
            pos2(bar.right() + 6.0, y),
            Align2::LEFT_CENTER,
            format!("{value:.0}"),
            FontId::proportional(11.0),
            text_color,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar and the plot title.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save image…").clicked() {
                save_image_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} x {} bins",
            state.raster.width, state.raster.height
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&state.raster.title);
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_image_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Save spectrogram image")
        .add_filter("PNG", &["png"])
        .set_file_name("spectrogram.png")
        .save_file();

    if let Some(path) = file {
        state.save_image(&path);
    }
}
