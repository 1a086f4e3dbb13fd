use eframe::egui::{Align, Layout, RichText, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::wide::WideTable;
use crate::format::{format_value, wrap_label};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Formatted, transposed view of the wide table
// ---------------------------------------------------------------------------

/// One table row: a series label (wrapped) and its formatted values per year.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label_lines: Vec<String>,
    pub cells: Vec<String>,
}

/// Transpose the wide table: rows are labels, columns are years. Missing
/// values become empty strings.
pub fn formatted_rows(wide: &WideTable, wrap_width: usize) -> Vec<TableRow> {
    wide.columns
        .iter()
        .map(|col| TableRow {
            label_lines: wrap_label(&col.label, wrap_width),
            cells: col
                .values
                .iter()
                .map(|v| v.map(format_value).unwrap_or_default())
                .collect(),
        })
        .collect()
}

/// Render the data table below the chart.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let wide = &state.wide;
    let rows = formatted_rows(wide, state.wrap_width);
    let line_height = ui.text_style_height(&TextStyle::Body);

    ui.strong("Data table");

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::right_to_left(Align::Center))
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto().at_least(60.0), wide.years.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    ui.strong("Series");
                });
            });
            for year in &wide.years {
                header.col(|ui| {
                    ui.strong(year.to_string());
                });
            }
        })
        .body(|body| {
            let heights = rows
                .iter()
                .map(|r| r.label_lines.len().max(1) as f32 * line_height + 6.0);
            body.heterogeneous_rows(heights, |mut row| {
                let data = &rows[row.index()];
                row.col(|ui| {
                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                        ui.label(RichText::new(data.label_lines.join("\n")));
                    });
                });
                for cell in &data.cells {
                    row.col(|ui| {
                        ui.label(cell.as_str());
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::Series;

    #[test]
    fn rows_are_labels_and_columns_are_years() {
        let wide = WideTable::assemble([
            Series::from_values(
                "Estado de Sao Paulo - Receita Corrente Liquida".into(),
                vec![(2020, Some(1234.0)), (2021, None)],
            ),
            Series::from_values("SP - Taxa".into(), vec![(2020, Some(0.125))]),
        ]);
        let rows = formatted_rows(&wide, 30);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].label_lines,
            ["Estado de Sao Paulo - Receita", "Corrente Liquida"]
        );
        assert_eq!(rows[0].cells, ["1.234", ""]);
        assert_eq!(rows[1].label_lines, ["SP - Taxa"]);
        assert_eq!(rows[1].cells, ["12,5", ""]);
    }
}
