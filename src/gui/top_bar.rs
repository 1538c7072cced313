use eframe::egui::{
    self,
    containers,
};

use crate::{
    core::session::SessionState,
    gui::actions::{
        ActionQueue,
        UiAction,
    },
};

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, state: &SessionState, actions: &mut ActionQueue) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Open Text File…").clicked() {
                        actions.push(UiAction::ChooseFile);
                    }
                    if ui.add_enabled(state.has_file(), egui::Button::new("Clear")).clicked() {
                        actions.push(UiAction::ClearFile);
                    }
                    let download = egui::Button::new("Download Results…");
                    if ui.add_enabled(state.result.is_some(), download).clicked() {
                        actions.push(UiAction::Download);
                    }
                    if ui.button("Quit").clicked() {
                        actions.push(UiAction::Quit);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicator(ui, state);
                });
            });
        });
    }

    fn show_status_indicator(ui: &mut egui::Ui, state: &SessionState) {
        let (color, tooltip) = if state.is_loading {
            (egui::Color32::from_rgb(230, 180, 40), "Waiting for the analysis service")
        } else if state.result.is_some() {
            (egui::Color32::from_rgb(0, 200, 0), "Results ready")
        } else {
            (egui::Color32::from_rgb(140, 140, 140), "Idle")
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small(state.output_format.label()).on_hover_text("Requested output format");
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
        });
    }
}
