use eframe::egui;

use crate::{
    core::{
        session::SessionState,
        OutputFormat,
    },
    gui::actions::{
        ActionQueue,
        UiAction,
    },
};

const SMALL_SPACING: f32 = 4.0;
const MEDIUM_SPACING: f32 = 8.0;

pub struct ControlsWidget;

impl ControlsWidget {
    pub fn show(ui: &mut egui::Ui, state: &SessionState, actions: &mut ActionQueue) {
        ui.horizontal(|ui| {
            if ui.button("Choose File").clicked() {
                actions.push(UiAction::ChooseFile);
            }
            ui.label(&state.file_name);
            if state.has_file() && ui.small_button("✖").on_hover_text("Clear file").clicked() {
                actions.push(UiAction::ClearFile);
            }
        });

        ui.add_space(SMALL_SPACING);

        ui.horizontal(|ui| {
            ui.label("Output format:");
            let mut selected = state.output_format;
            for format in OutputFormat::ALL {
                if ui.radio_value(&mut selected, format, format.label()).changed() {
                    actions.push(UiAction::SetOutputFormat(format));
                }
            }
        });

        ui.add_space(MEDIUM_SPACING);

        ui.horizontal(|ui| {
            let can_analyze = state.has_file() && !state.is_loading;
            if ui.add_enabled(can_analyze, egui::Button::new("Analyze")).clicked() {
                actions.push(UiAction::Analyze);
            }

            if state.is_loading {
                ui.add(egui::Spinner::new());
                ui.label("Analyzing…");
            }

            let can_download = state.result.is_some() && !state.is_loading;
            let label = format!("Download {}", state.output_format.label());
            if ui.add_enabled(can_download, egui::Button::new(label)).clicked() {
                actions.push(UiAction::Download);
            }
        });
    }
}
