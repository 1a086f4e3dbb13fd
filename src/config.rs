use std::path::PathBuf;

use clap::Parser;

/// Interactive panel of yearly fiscal indicators per government entity.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) Spreadsheet to open at startup. Column 0 is the
    /// entity, column 1 the variable, the remaining columns are years.
    /// Supported: .xlsx .xlsm .xls .xlsb .ods .csv .json .parquet
    pub file: Option<PathBuf>,

    /// (default: first worksheet) Worksheet to read from workbook files.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Maximum characters per line of the series labels in the data table.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(5..))]
    pub wrap_width: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["fiscal-panel"]).unwrap();
        assert!(args.file.is_none());
        assert!(args.sheet.is_none());
        assert_eq!(args.wrap_width, 30);
    }

    #[test]
    fn file_and_options() {
        let args = Args::try_parse_from([
            "fiscal-panel",
            "dados.xlsx",
            "--sheet",
            "Planilha1",
            "--wrap-width",
            "20",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("dados.xlsx")));
        assert_eq!(args.sheet.as_deref(), Some("Planilha1"));
        assert_eq!(args.wrap_width, 20);
    }

    #[test]
    fn tiny_wrap_width_is_rejected() {
        assert!(Args::try_parse_from(["fiscal-panel", "--wrap-width", "2"]).is_err());
    }
}
