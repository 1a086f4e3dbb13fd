use std::path::{Path, PathBuf};

use crate::chart::ChartModel;
use crate::data::loader::load_file;
use crate::data::model::SourceTable;
use crate::data::selection::{Selection, SelectionAction};
use crate::data::wide::WideTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file loads successfully).
    pub table: Option<SourceTable>,

    /// Path of the loaded file, for the status bar.
    pub source_path: Option<PathBuf>,

    /// The user's (entity, variable) picks.
    pub selection: Selection,

    /// Wide table for the current selection (rebuilt after every change).
    pub wide: WideTable,

    /// Chart for the current wide table.
    pub chart: ChartModel,

    /// Worksheet to read from workbook files.
    pub sheet: Option<String>,

    /// Label wrap width used by the data table.
    pub wrap_width: usize,

    /// Error from the last load attempt, shown instead of the selectors.
    pub load_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source_path: None,
            selection: Selection::default(),
            wide: WideTable::default(),
            chart: ChartModel::from_wide(&WideTable::default()),
            sheet: None,
            wrap_width: 30,
            load_error: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table and start a fresh selection.
    pub fn set_table(&mut self, table: SourceTable) {
        self.table = Some(table);
        self.selection = Selection::default();
        self.load_error = None;
        self.refresh();
    }

    /// Load `path`, replacing the current table. A failure discards the
    /// previous table so nothing stale is rendered.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path, self.sheet.as_deref()) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows, {} entities from {} with columns {:?}",
                    table.len(),
                    table.entities().len(),
                    path.display(),
                    table.headers
                );
                self.source_path = Some(path.to_path_buf());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.table = None;
                self.source_path = None;
                self.selection = Selection::default();
                self.load_error = Some(format!("Error: {e}"));
                self.refresh();
            }
        }
    }

    /// Apply user actions collected during a frame, then rebuild derived data.
    pub fn apply_actions(&mut self, actions: Vec<SelectionAction>) {
        if actions.is_empty() {
            return;
        }
        for action in actions {
            self.selection.apply(action);
        }
        self.refresh();
    }

    /// Recompute the wide table and chart from the selection.
    pub fn refresh(&mut self) {
        self.wide = match &self.table {
            Some(table) => WideTable::from_selection(table, &self.selection),
            None => WideTable::default(),
        };
        self.chart = ChartModel::from_wide(&self.wide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("dados.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"ente,variavel,2020,2021\nStateA,GDP,100,200\nStateA,Rate,0.5,0.6\n")
            .unwrap();
        path
    }

    #[test]
    fn load_then_pick_builds_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.load_path(&csv_file(&dir));
        assert!(state.load_error.is_none());
        assert!(state.wide.is_empty());

        state.apply_actions(vec![
            SelectionAction::SetEntity(0, Some("StateA".into())),
            SelectionAction::SetVariable(0, Some("GDP".into())),
            SelectionAction::Add,
            SelectionAction::SetEntity(1, Some("StateA".into())),
            SelectionAction::SetVariable(1, Some("Rate".into())),
        ]);
        assert_eq!(state.wide.columns.len(), 2);
        assert_eq!(state.chart.traces.len(), 2);
        assert!(state.chart.has_secondary());
    }

    #[test]
    fn failed_load_discards_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.load_path(&csv_file(&dir));
        state.apply_actions(vec![
            SelectionAction::SetEntity(0, Some("StateA".into())),
            SelectionAction::SetVariable(0, Some("GDP".into())),
        ]);
        assert!(!state.wide.is_empty());

        state.load_path(&dir.path().join("missing.csv"));
        assert!(state.table.is_none());
        assert!(state.load_error.is_some());
        assert!(state.wide.is_empty());
        assert_eq!(state.selection, Selection::default());
    }
}
