//! Header-aware CSV parsing with per-cell type inference.
//!
//! The loader only depends on the [`TableParser`] trait so tests can hand it
//! prepared tables. [`CsvTableParser`] is the production implementation.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Cell;
use crate::error::LoadError;

/// Numbers beyond this magnitude lose integer precision and stay text.
const MAX_SAFE_FLOAT: f64 = 9_007_199_254_740_992.0;

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").expect("numeric pattern is valid")
});

static EMPTY: Cell = Cell::Empty;

/// A parsed table: header names plus rows of cells aligned to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        let mut header_map = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            header_map.entry(name.clone()).or_insert(idx);
        }
        Self {
            headers,
            header_map,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding missing trailing cells with `Empty` and
    /// discarding cells beyond the header width.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.headers.len(), Cell::Empty);
        self.rows.push(cells);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }
}

/// Borrowed view of one table row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    /// Cell under `column`; `Empty` if the column does not exist.
    pub fn get(&self, column: &str) -> &'a Cell {
        self.table
            .header_map
            .get(column)
            .and_then(|idx| self.cells.get(*idx))
            .unwrap_or(&EMPTY)
    }
}

pub trait TableParser {
    /// Parse `text` into a table. Fails only when no header row can be read.
    fn parse(&self, text: &str) -> Result<Table, LoadError>;
}

/// Comma-separated parser backed by the `csv` crate.
///
/// Header names are kept verbatim apart from a leading BOM, so `" 1800"` is
/// not the same column as `"1800"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableParser;

impl CsvTableParser {
    pub fn new() -> Self {
        Self
    }
}

impl TableParser for CsvTableParser {
    fn parse(&self, text: &str) -> Result<Table, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Parse(format!("failed to read header row: {e}")))?;
        let headers: Vec<String> = headers.iter().map(normalize_header_name).collect();
        if headers.iter().all(String::is_empty) {
            return Err(LoadError::Parse("missing header row".to_string()));
        }

        let mut table = Table::new(headers);
        for (idx, result) in reader.records().enumerate() {
            // records() starts after the header on 1-based line 2.
            let line = idx + 2;
            match result {
                Ok(record) => table.push_row(record.iter().map(infer_cell).collect()),
                Err(e) => log::debug!("Skipping unreadable CSV record near line {line}: {e}"),
            }
        }

        Ok(table)
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim_start_matches('\u{feff}').to_string()
}

/// Infer a typed value from a raw cell string.
pub fn infer_cell(raw: &str) -> Cell {
    match raw {
        "" => return Cell::Empty,
        "true" | "TRUE" => return Cell::Bool(true),
        "false" | "FALSE" => return Cell::Bool(false),
        _ => {}
    }

    if NUMERIC.is_match(raw) {
        if let Ok(n) = raw.trim().parse::<f64>() {
            if n > -MAX_SAFE_FLOAT && n < MAX_SAFE_FLOAT {
                return Cell::Number(n);
            }
        }
    }

    Cell::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_cell_types() {
        assert_eq!(infer_cell(""), Cell::Empty);
        assert_eq!(infer_cell("TRUE"), Cell::Bool(true));
        assert_eq!(infer_cell("false"), Cell::Bool(false));
        assert_eq!(infer_cell("42"), Cell::Number(42.0));
        assert_eq!(infer_cell("-74.006"), Cell::Number(-74.006));
        assert_eq!(infer_cell(" 12.5 "), Cell::Number(12.5));
        assert_eq!(infer_cell(".5"), Cell::Number(0.5));
        assert_eq!(infer_cell("3."), Cell::Number(3.0));
        assert_eq!(infer_cell("1e3"), Cell::Number(1000.0));
        assert_eq!(infer_cell("1,000"), Cell::Text("1,000".to_string()));
        assert_eq!(infer_cell("NaN"), Cell::Text("NaN".to_string()));
        assert_eq!(infer_cell("Infinity"), Cell::Text("Infinity".to_string()));
        assert_eq!(infer_cell("12 Main"), Cell::Text("12 Main".to_string()));
        assert_eq!(
            infer_cell("99999999999999999999"),
            Cell::Text("99999999999999999999".to_string())
        );
    }

    #[test]
    fn parses_header_and_rows() {
        let text = "\u{feff}City,State,1800\nBoston,MA,24937\nSalem,MA\n";
        let table = CsvTableParser::new().parse(text).unwrap();
        assert_eq!(table.headers(), &["City", "State", "1800"]);
        assert_eq!(table.len(), 2);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("City"), &Cell::Text("Boston".to_string()));
        assert_eq!(rows[0].get("1800"), &Cell::Number(24_937.0));
        assert_eq!(rows[1].get("1800"), &Cell::Empty);
        assert_eq!(rows[1].get("Missing"), &Cell::Empty);
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let text = "City,State\n\"Washington, D.C.\",DC\n";
        let table = CsvTableParser::new().parse(text).unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("City"), &Cell::Text("Washington, D.C.".to_string()));
    }

    #[test]
    fn header_whitespace_is_preserved() {
        let table = CsvTableParser::new().parse("City, State,1800 \nTulsa,OK,1390\n").unwrap();
        assert_eq!(table.headers(), &["City", " State", "1800 "]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("State"), &Cell::Empty);
        assert_eq!(row.get(" State"), &Cell::Text("OK".to_string()));
    }

    #[test]
    fn empty_text_has_no_header() {
        let err = CsvTableParser::new().parse("").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn header_only_table_is_empty() {
        let table = CsvTableParser::new().parse("City,State,Latitude,Longitude\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 4);
    }
}
