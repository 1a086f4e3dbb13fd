use eframe::egui;

use crate::config::Args;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FiscalPanelApp {
    pub state: AppState,
}

impl FiscalPanelApp {
    pub fn new(args: &Args) -> Self {
        let mut state = AppState {
            sheet: args.sheet.clone(),
            wrap_width: usize::from(args.wrap_width),
            ..AppState::default()
        };
        if let Some(path) = &args.file {
            state.load_path(path);
        }
        Self { state }
    }
}

impl eframe::App for FiscalPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: entity / variable selectors ----
        egui::SidePanel::left("selection_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                let actions = panels::selection_panel(ui, &self.state);
                self.state.apply_actions(actions);
            });

        // ---- Central panel: chart above, data table below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if !plot::has_content(ui, &self.state) {
                return;
            }
            let plot_height = (ui.available_height() * 0.6).max(240.0);
            plot::series_plot(ui, &self.state, plot_height);
            ui.separator();
            table::data_table(ui, &self.state);
        });
    }
}
