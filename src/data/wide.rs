use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::model::SourceTable;
use super::selection::Selection;
use super::series::{extract, Series};

// ---------------------------------------------------------------------------
// WideTable – all selected series outer-joined on year
// ---------------------------------------------------------------------------

/// One labelled column of the wide table.
#[derive(Debug, Clone, PartialEq)]
pub struct WideColumn {
    pub label: String,
    pub is_percentage: bool,
    /// Aligned with [`WideTable::years`].
    pub values: Vec<Option<f64>>,
}

/// Year-indexed table with one column per distinct series label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    /// Sorted union of the years of every series.
    pub years: Vec<i32>,
    /// Columns in selection order.
    pub columns: Vec<WideColumn>,
    /// Number of cells that could not be parsed across all series.
    pub parse_warnings: usize,
}

impl WideTable {
    /// Outer-join series on year. When two series share a label only the
    /// first one is kept.
    pub fn assemble(series: impl IntoIterator<Item = Series>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let kept: Vec<Series> = series
            .into_iter()
            .filter(|s| seen.insert(s.label.clone()))
            .collect();

        let years: Vec<i32> = kept
            .iter()
            .flat_map(|s| s.points.iter().map(|(y, _)| *y))
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect();

        let parse_warnings = kept.iter().map(|s| s.warnings.len()).sum();

        let columns = kept
            .into_iter()
            .map(|s| {
                let by_year: BTreeMap<i32, Option<f64>> = s.points.iter().copied().collect();
                WideColumn {
                    values: years
                        .iter()
                        .map(|y| by_year.get(y).copied().flatten())
                        .collect(),
                    label: s.label,
                    is_percentage: s.is_percentage,
                }
            })
            .collect();

        WideTable {
            years,
            columns,
            parse_warnings,
        }
    }

    /// Rebuild the table for the current selection.
    pub fn from_selection(table: &SourceTable, selection: &Selection) -> Self {
        Self::assemble(selection.complete().filter_map(|pick| extract(table, pick)))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

}
