use eframe::egui;

use crate::{
    core::notifications::NotificationCenter,
    gui::actions::{
        ActionQueue,
        UiAction,
    },
};

const TOAST_BOTTOM_OFFSET: f32 = 20.0;

pub struct Toast;

impl Toast {
    /// Draws the current notification, if visible. Clicking it dismisses it.
    pub fn show(
        ctx: &egui::Context,
        notifications: &NotificationCenter,
        actions: &mut ActionQueue,
    ) {
        let Some(message) = notifications.message() else {
            return;
        };

        egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -TOAST_BOTTOM_OFFSET))
            .show(ctx, |ui| {
                let response = egui::Frame::new()
                    .fill(egui::Color32::from_rgb(0x33, 0x33, 0x33))
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::same(16))
                    .shadow(egui::Shadow {
                        offset: [0, 4],
                        blur: 6,
                        spread: 0,
                        color: egui::Color32::from_black_alpha(25),
                    })
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    })
                    .response
                    .interact(egui::Sense::click());

                if response.clicked() {
                    actions.push(UiAction::DismissNotification);
                }
            });
    }
}
