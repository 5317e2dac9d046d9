use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::SetDimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the Arc so filter edits can mutate `state` while we iterate.
    let Some(dataset) = state.dataset().cloned() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Departure period ----
            ui.strong("Departure period");
            match state.selection.departure {
                Some(range) => {
                    let mut start = range.start;
                    let mut end = range.end;
                    let mut changed = false;
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("From");
                        changed |= ui
                            .add(DatePickerButton::new(&mut start).id_salt("date_start"))
                            .changed();
                        ui.label("to");
                        changed |= ui
                            .add(DatePickerButton::new(&mut end).id_salt("date_end"))
                            .changed();
                    });
                    if changed {
                        state.set_date_range(start, end);
                    }
                    if let Some((lo, hi)) = dataset.departure_bounds {
                        if ui.small_button("Whole period").clicked() {
                            state.set_date_range(lo, hi);
                        }
                    }
                }
                None => {
                    ui.label("No departure dates in this extract.");
                }
            }
            ui.separator();

            // ---- Per-dimension filter widgets (collapsible) ----
            for dim in SetDimension::ALL {
                let Some(all_values) = dataset.values_for(dim) else {
                    continue;
                };
                if all_values.is_empty() {
                    continue;
                }

                // Show selected / total in the header; no selection = all pass.
                let n_selected = state.selection.selected(dim).map_or(0, |s| s.len());
                let header_text = if n_selected == 0 {
                    format!("{}  (all)", dim.label())
                } else {
                    format!("{}  ({n_selected}/{})", dim.label(), all_values.len())
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.clear_dimension(dim);
                        }

                        for value in all_values {
                            let mut checked = state
                                .selection
                                .selected(dim)
                                .is_some_and(|s| s.contains(value));
                            if ui.checkbox(&mut checked, value).changed() {
                                state.toggle_filter_value(dim, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.cache.invalidate();
                state.load();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.dataset() {
            ui.label(format!(
                "{} orders loaded, {} match the filters",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open order extract")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
