use std::collections::HashMap;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Cell – a single raw spreadsheet cell
// ---------------------------------------------------------------------------

/// A raw cell as read from the source, before any numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a cell from free text, treating blank strings as empty.
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Render the cell as a label (entity / variable / header text).
    pub fn as_label(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) => format_plain_number(*v),
        }
    }

    /// Interpret a header cell as a year.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < i32::MAX as f64 => Some(*v as i32),
            Cell::Text(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }
}

/// Integral floats (e.g. entity codes read from a workbook) print without `.0`.
fn format_plain_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// SourceRow – one row of the spreadsheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SourceRow {
    /// Column 0.
    pub entity: String,
    /// Column 1.
    pub variable: String,
    /// One cell per year column, aligned with [`SourceTable::years`].
    pub cells: Vec<Cell>,
}

// ---------------------------------------------------------------------------
// SourceTable – the complete loaded spreadsheet
// ---------------------------------------------------------------------------

/// The full parsed spreadsheet with pre-computed entity / variable indices.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Header labels of all columns.
    pub headers: Vec<String>,
    /// Year of each observation column (columns 2..N).
    pub years: Vec<i32>,
    /// All data rows, in file order.
    pub rows: Vec<SourceRow>,
    /// Distinct non-empty entities, first-seen order.
    entities: Vec<String>,
    /// Entity → distinct non-empty variables, first-seen order.
    variables: HashMap<String, Vec<String>>,
}

impl SourceTable {
    /// Build the table from a header row and raw data rows.
    ///
    /// Rows shorter than the header are padded with [`Cell::Empty`], longer
    /// rows are truncated. Rows with no content at all are dropped.
    pub fn from_grid(header: Vec<Cell>, grid: Vec<Vec<Cell>>) -> Result<Self, LoadError> {
        if header.is_empty() {
            return Err(LoadError::MissingHeader);
        }
        if header.len() < 3 {
            return Err(LoadError::TooFewColumns {
                found: header.len(),
            });
        }

        let headers: Vec<String> = header.iter().map(Cell::as_label).collect();
        let years = header[2..]
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.as_year().ok_or_else(|| LoadError::InvalidYearHeader {
                    column: i + 2,
                    header: cell.as_label(),
                })
            })
            .collect::<Result<Vec<i32>, LoadError>>()?;

        let width = header.len();
        let rows: Vec<SourceRow> = grid
            .into_iter()
            .filter(|raw| raw.iter().any(|c| !c.is_empty()))
            .map(|mut raw| {
                raw.resize(width, Cell::Empty);
                let cells = raw.split_off(2);
                SourceRow {
                    entity: raw[0].as_label(),
                    variable: raw[1].as_label(),
                    cells,
                }
            })
            .collect();

        Ok(Self::from_rows(headers, years, rows))
    }

    /// Build entity / variable indices from already-split rows.
    pub fn from_rows(headers: Vec<String>, years: Vec<i32>, rows: Vec<SourceRow>) -> Self {
        let mut entities: Vec<String> = Vec::new();
        let mut variables: HashMap<String, Vec<String>> = HashMap::new();

        for row in &rows {
            if row.entity.is_empty() {
                continue;
            }
            let vars = variables.entry(row.entity.clone()).or_insert_with(|| {
                entities.push(row.entity.clone());
                Vec::new()
            });
            if !row.variable.is_empty() && !vars.contains(&row.variable) {
                vars.push(row.variable.clone());
            }
        }

        SourceTable {
            headers,
            years,
            rows,
            entities,
            variables,
        }
    }

    /// Distinct entities in first-seen order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Distinct variables recorded for `entity`, first-seen order.
    pub fn variables_for(&self, entity: &str) -> &[String] {
        self.variables
            .get(entity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All rows matching an (entity, variable) pair, file order.
    pub fn matching_rows<'a>(
        &'a self,
        entity: &'a str,
        variable: &'a str,
    ) -> impl Iterator<Item = &'a SourceRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.entity == entity && r.variable == variable)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn header() -> Vec<Cell> {
        vec![text("ente"), text("variavel"), text("2020"), Cell::Number(2021.0)]
    }

    #[test]
    fn entities_and_variables_keep_first_seen_order() {
        let grid = vec![
            vec![text("SP"), text("PIB"), Cell::Number(1.0), Cell::Number(2.0)],
            vec![text("RJ"), text("Receita"), Cell::Number(1.0), Cell::Empty],
            vec![text("SP"), text("Divida"), Cell::Empty, Cell::Number(3.0)],
            vec![text("SP"), text("PIB"), Cell::Number(9.0), Cell::Number(9.0)],
        ];
        let table = SourceTable::from_grid(header(), grid).unwrap();

        assert_eq!(table.entities(), ["SP", "RJ"]);
        assert_eq!(table.variables_for("SP"), ["PIB", "Divida"]);
        assert_eq!(table.variables_for("RJ"), ["Receita"]);
        assert!(table.variables_for("MG").is_empty());
        assert_eq!(table.years, vec![2020, 2021]);
        assert_eq!(table.matching_rows("SP", "PIB").count(), 2);
    }

    #[test]
    fn short_rows_are_padded_and_blank_rows_dropped() {
        let grid = vec![
            vec![text("SP"), text("PIB"), Cell::Number(1.0)],
            vec![Cell::Empty, Cell::from_text("  "), Cell::Empty, Cell::Empty],
        ];
        let table = SourceTable::from_grid(header(), grid).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].cells, vec![Cell::Number(1.0), Cell::Empty]);
    }

    #[test]
    fn numeric_entity_codes_render_without_fraction() {
        let grid = vec![vec![
            Cell::Number(3550308.0),
            text("PIB"),
            Cell::Number(1.0),
            Cell::Number(2.0),
        ]];
        let table = SourceTable::from_grid(header(), grid).unwrap();
        assert_eq!(table.entities(), ["3550308"]);
    }

    #[test]
    fn fewer_than_three_columns_is_rejected() {
        let err = SourceTable::from_grid(vec![text("ente"), text("variavel")], vec![]).unwrap_err();
        assert!(matches!(err, LoadError::TooFewColumns { found: 2 }));
    }

    #[test]
    fn non_year_header_is_rejected() {
        let header = vec![text("ente"), text("variavel"), text("total")];
        let err = SourceTable::from_grid(header, vec![]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidYearHeader { column: 2, .. }));
    }
}
