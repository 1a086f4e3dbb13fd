use super::error::ParseWarning;
use super::model::{Cell, SourceTable};
use super::selection::{series_label, Pick};

// ---------------------------------------------------------------------------
// Series – one extracted (entity, variable) time series
// ---------------------------------------------------------------------------

/// Year-indexed values of one pick, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// `"{entity} - {variable}"`.
    pub label: String,
    /// `(year, value)` in source column order. `None` is a gap.
    pub points: Vec<(i32, Option<f64>)>,
    /// Values were fractional and have been scaled by 100.
    pub is_percentage: bool,
    /// Cells that could not be read as numbers.
    pub warnings: Vec<ParseWarning>,
}

impl Series {
    /// Build a series from raw values, classifying and scaling them.
    pub fn from_values(label: String, points: Vec<(i32, Option<f64>)>) -> Self {
        let is_percentage = is_percentage(points.iter().map(|(_, v)| *v));
        let points = if is_percentage {
            points
                .into_iter()
                .map(|(year, v)| (year, v.map(|x| x * 100.0)))
                .collect()
        } else {
            points
        };
        Series {
            label,
            points,
            is_percentage,
            warnings: Vec::new(),
        }
    }
}

/// A series is percentage-valued when it has at least one value and every
/// present value is below 1 in magnitude. All-missing series are absolute.
pub fn is_percentage(values: impl IntoIterator<Item = Option<f64>>) -> bool {
    let mut any_present = false;
    for v in values.into_iter().flatten() {
        if v.abs() >= 1.0 {
            return false;
        }
        any_present = true;
    }
    any_present
}

/// Coerce a raw cell to a number. Blank cells are missing; unparsable text is
/// missing and reported as `Err` with the offending text.
pub fn coerce_cell(cell: &Cell) -> Result<Option<f64>, String> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(v) if v.is_nan() => Ok(None),
        Cell::Number(v) => Ok(Some(*v)),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<f64>() {
                Ok(v) if v.is_nan() => Ok(None),
                Ok(v) => Ok(Some(v)),
                Err(_) => Err(s.to_string()),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract the series for a complete pick.
///
/// The first row matching (entity, variable) is used. Returns `None` for
/// incomplete picks and for picks with no matching row.
pub fn extract(table: &SourceTable, pick: &Pick) -> Option<Series> {
    let (entity, variable) = match (&pick.entity, &pick.variable) {
        (Some(e), Some(v)) => (e.as_str(), v.as_str()),
        _ => return None,
    };
    let label = series_label(entity, variable);

    let mut matches = table.matching_rows(entity, variable);
    let Some(row) = matches.next() else {
        log::debug!("no row for '{label}'");
        return None;
    };
    let extra = matches.count();
    if extra > 0 {
        log::warn!("'{label}' matches {} rows, using the first", extra + 1);
    }

    let mut warnings = Vec::new();
    let points: Vec<(i32, Option<f64>)> = table
        .years
        .iter()
        .zip(&row.cells)
        .map(|(&year, cell)| {
            let value = coerce_cell(cell).unwrap_or_else(|raw| {
                let warning = ParseWarning {
                    label: label.clone(),
                    year,
                    raw,
                };
                log::debug!("{warning}");
                warnings.push(warning);
                None
            });
            (year, value)
        })
        .collect();

    let mut series = Series::from_values(label, points);
    series.warnings = warnings;
    Some(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[Option<f64>]) -> Series {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| (2020 + i as i32, *v))
            .collect();
        Series::from_values("x".to_string(), points)
    }

    fn assert_values(s: &Series, expected: &[Option<f64>]) {
        let got: Vec<Option<f64>> = s.points.iter().map(|(_, v)| *v).collect();
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            match (g, e) {
                (Some(g), Some(e)) => assert!((g - e).abs() < 1e-9, "{g} != {e}"),
                (None, None) => {}
                _ => panic!("{got:?} != {expected:?}"),
            }
        }
    }

    #[test]
    fn fractional_series_is_percentage_and_scaled() {
        let s = series(&[Some(0.05), Some(0.10), None, Some(0.20)]);
        assert!(s.is_percentage);
        assert_values(&s, &[Some(5.0), Some(10.0), None, Some(20.0)]);
    }

    #[test]
    fn absolute_series_passes_through() {
        let s = series(&[Some(50.0), Some(120.0), None]);
        assert!(!s.is_percentage);
        assert_values(&s, &[Some(50.0), Some(120.0), None]);
    }

    #[test]
    fn all_missing_series_is_absolute() {
        let s = series(&[None, None, None]);
        assert!(!s.is_percentage);
        assert_values(&s, &[None, None, None]);
    }

    #[test]
    fn negative_fractions_count_by_magnitude() {
        assert!(is_percentage([Some(-0.3), Some(0.2)]));
        assert!(!is_percentage([Some(-1.5), Some(0.2)]));
        assert!(!is_percentage([Some(1.0)]));
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(coerce_cell(&Cell::Empty), Ok(None));
        assert_eq!(coerce_cell(&Cell::Number(f64::NAN)), Ok(None));
        assert_eq!(coerce_cell(&Cell::Number(2.5)), Ok(Some(2.5)));
        assert_eq!(coerce_cell(&Cell::Text(" 12.5 ".into())), Ok(Some(12.5)));
        assert_eq!(coerce_cell(&Cell::Text("   ".into())), Ok(None));
        assert_eq!(coerce_cell(&Cell::Text("n/d".into())), Err("n/d".to_string()));
    }

    fn table() -> SourceTable {
        let t = |s: &str| Cell::Text(s.to_string());
        let header = vec![t("ente"), t("variavel"), t("2020"), t("2021")];
        let grid = vec![
            vec![t("StateA"), t("GDP"), Cell::Number(100.0), Cell::Number(200.0)],
            vec![t("StateA"), t("Rate"), Cell::Number(0.5), t("0.6")],
            vec![t("StateA"), t("GDP"), Cell::Number(1.0), Cell::Number(2.0)],
            vec![t("StateB"), t("Debt"), t("-"), Cell::Number(30.0)],
        ];
        SourceTable::from_grid(header, grid).unwrap()
    }

    #[test]
    fn extracts_first_matching_row() {
        let s = extract(&table(), &Pick::new("StateA", "GDP")).unwrap();
        assert_eq!(s.label, "StateA - GDP");
        assert_eq!(s.points, vec![(2020, Some(100.0)), (2021, Some(200.0))]);
        assert!(!s.is_percentage);
    }

    #[test]
    fn text_numbers_are_coerced_and_classified() {
        let s = extract(&table(), &Pick::new("StateA", "Rate")).unwrap();
        assert!(s.is_percentage);
        assert_values(&s, &[Some(50.0), Some(60.0)]);
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn unparsable_cells_become_missing_with_warning() {
        let s = extract(&table(), &Pick::new("StateB", "Debt")).unwrap();
        assert_eq!(s.points, vec![(2020, None), (2021, Some(30.0))]);
        assert_eq!(s.warnings.len(), 1);
        assert_eq!(s.warnings[0].year, 2020);
        assert_eq!(s.warnings[0].raw, "-");
    }

    #[test]
    fn incomplete_or_unknown_picks_yield_nothing() {
        let table = table();
        let partial = Pick {
            entity: Some("StateA".into()),
            variable: None,
        };
        assert!(extract(&table, &partial).is_none());
        assert!(extract(&table, &Pick::new("StateB", "GDP")).is_none());
    }
}
