use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::selection::SelectionAction;
use crate::state::AppState;

const PLACEHOLDER: &str = "Choose…";

// ---------------------------------------------------------------------------
// Left side panel – one row of selectors per pick
// ---------------------------------------------------------------------------

/// Render the selector rows. Returns the actions the user took this frame;
/// the caller applies them to the state.
pub fn selection_panel(ui: &mut Ui, state: &AppState) -> Vec<SelectionAction> {
    let mut actions = Vec::new();

    ui.heading("Series");
    ui.separator();

    let table = match &state.table {
        Some(t) => t,
        None => {
            let msg = if state.load_error.is_some() {
                "Fix the file and open it again."
            } else {
                "No spreadsheet loaded."
            };
            ui.label(msg);
            return actions;
        }
    };

    let removable = state.selection.len() > 1;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, pick) in state.selection.picks().iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    ui.strong(format!("Entity {}", i + 1));
                    if removable
                        && ui
                            .small_button("✖")
                            .on_hover_text("Remove this series")
                            .clicked()
                    {
                        actions.push(SelectionAction::Remove(i));
                    }
                });

                // ---- Entity ----
                let mut entity = pick.entity.clone();
                egui::ComboBox::from_id_salt(("entity", i))
                    .width(ui.available_width())
                    .selected_text(pick.entity.as_deref().unwrap_or(PLACEHOLDER))
                    .show_ui(ui, |ui: &mut Ui| {
                        for e in table.entities() {
                            ui.selectable_value(&mut entity, Some(e.clone()), e.as_str());
                        }
                    });
                if entity != pick.entity {
                    actions.push(SelectionAction::SetEntity(i, entity));
                }

                // ---- Variable (filtered by the chosen entity) ----
                let variables = pick
                    .entity
                    .as_deref()
                    .map(|e| table.variables_for(e))
                    .unwrap_or(&[]);
                let mut variable = pick.variable.clone();
                ui.add_enabled_ui(pick.entity.is_some(), |ui: &mut Ui| {
                    egui::ComboBox::from_id_salt(("variable", i))
                        .width(ui.available_width())
                        .selected_text(pick.variable.as_deref().unwrap_or(PLACEHOLDER))
                        .show_ui(ui, |ui: &mut Ui| {
                            for v in variables {
                                ui.selectable_value(&mut variable, Some(v.clone()), v.as_str());
                            }
                        });
                });
                if variable != pick.variable {
                    actions.push(SelectionAction::SetVariable(i, variable));
                }

                ui.add_space(6.0);
            }

            if ui.button("+ Add variable").clicked() {
                actions.push(SelectionAction::Add);
            }
        });

    actions
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
        });

        ui.separator();

        if let (Some(table), Some(path)) = (&state.table, &state.source_path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} rows, {} entities, {} series selected",
                table.len(),
                table.entities().len(),
                state.wide.columns.len()
            ));
        }

        if state.wide.parse_warnings > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{} non-numeric cell(s) shown as gaps",
                    state.wide.parse_warnings
                ))
                .color(Color32::from_rgb(200, 140, 0)),
            );
        }

        if let Some(msg) = &state.load_error {
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
        .set_title("Open indicator spreadsheet")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xls", "xlsb", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Excel / ODS", &["xlsx", "xlsm", "xls", "xlsb", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
