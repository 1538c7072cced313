use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::core::metrics::MetricsView;

// Table Constants
const RESULTS_TABLE_HEIGHT: f32 = 300.0;
const TABLE_LETTER_COLUMN_WIDTH: f32 = 80.0;
const TABLE_COUNT_COLUMN_WIDTH: f32 = 80.0;
const TABLE_HEADER_HEIGHT: f32 = 20.0;
const TABLE_ROW_HEIGHT: f32 = 18.0;
const SMALL_SPACING: f32 = 4.0;

pub struct ResultsTableWidget;

impl ResultsTableWidget {
    pub fn show(ui: &mut egui::Ui, metrics: &MetricsView) {
        ui.horizontal(|ui| {
            ui.strong("Slow bike count:");
            ui.label(metrics.slow_bike_count().to_string());
        });

        ui.add_space(SMALL_SPACING);

        if metrics.consonants().is_empty() {
            ui.weak("No consonant counts.");
            return;
        }

        egui::ScrollArea::vertical().max_height(RESULTS_TABLE_HEIGHT).show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::initial(TABLE_LETTER_COLUMN_WIDTH).resizable(true))
                .column(Column::initial(TABLE_COUNT_COLUMN_WIDTH).resizable(true))
                .header(TABLE_HEADER_HEIGHT, |mut header| {
                    header.col(|ui| {
                        ui.strong("Letter");
                    });
                    header.col(|ui| {
                        ui.strong("Count");
                    });
                })
                .body(|mut body| {
                    for entry in metrics.consonants() {
                        body.row(TABLE_ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(&entry.letter);
                            });
                            row.col(|ui| {
                                ui.label(entry.count.to_string());
                            });
                        });
                    }
                });
        });
    }
}
