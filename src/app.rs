use eframe::egui;

use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FretDashApp {
    pub state: AppState,
}

impl FretDashApp {
    /// Build the app and load the default extract up front; a missing file
    /// leaves the dashboard in its "not loaded" state with a visible message.
    pub fn new() -> Self {
        let mut state = AppState::default();
        state.load();
        Self { state }
    }
}

impl Default for FretDashApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for FretDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scorecards + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &mut self.state);
        });
    }
}
