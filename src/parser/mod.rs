//! CSV to dynamic-row parsing with delimiter auto-detection.
//!
//! Converts CSV rows into JSON objects keyed by column header. This is an
//! ingestion convenience for callers and tests; the transform functions
//! themselves operate on in-memory records (see [`crate::models`]).

use log::debug;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records as JSON objects.
    pub records: Vec<Value>,
    /// Column headers in file order.
    pub headers: Vec<String>,
    /// Detected or used delimiter.
    pub delimiter: char,
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into JSON objects with an explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers and values
/// are the cell strings.
///
/// # Example
/// ```
/// use tollgrid::parser::csv_to_rows;
///
/// let csv = "id_start,id_end,distance\n1,2,10\n2,3,7.5";
/// let rows = csv_to_rows(csv, ',').unwrap();
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0]["id_start"], "1");
/// assert_eq!(rows[1]["distance"], "7.5");
/// ```
pub fn csv_to_rows(csv: &str, delimiter: char) -> CsvResult<Vec<Value>> {
    parse_csv(csv.as_bytes(), delimiter)
}

/// Parse CSV from a reader into JSON objects.
pub fn parse_csv<R: Read>(reader: R, delimiter: char) -> CsvResult<Vec<Value>> {
    read_rows(reader, delimiter).map(|result| result.records)
}

/// Parse CSV text with delimiter auto-detection, returning rows plus
/// parsing metadata.
pub fn parse_csv_str_auto(content: &str) -> CsvResult<ParseResult> {
    let delimiter = detect_delimiter(content);
    read_rows(content.as_bytes(), delimiter)
}

/// Parse a CSV file with delimiter auto-detection.
pub fn parse_csv_file(path: &Path) -> CsvResult<ParseResult> {
    let content = std::fs::read_to_string(path)?;
    parse_csv_str_auto(&content)
}

fn read_rows<R: Read>(reader: R, delimiter: char) -> CsvResult<ParseResult> {
    if !delimiter.is_ascii() {
        return Err(CsvError::Parse(format!(
            "Delimiter '{delimiter}' is not a single-byte character"
        )));
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|_| CsvError::EmptyInput)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), Value::String(cell.to_string()));
        }
        records.push(Value::Object(row));
    }

    if records.is_empty() {
        return Err(CsvError::EmptyInput);
    }

    debug!(
        "parsed {} rows, {} columns (delimiter '{}')",
        records.len(),
        headers.len(),
        delimiter
    );

    Ok(ParseResult {
        records,
        headers,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a|b|c"), '|');
    }

    #[test]
    fn test_csv_to_rows() {
        let rows = csv_to_rows("id_1,id_2,car\n801,802,12\n802,803,30", ',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id_1"], "801");
        assert_eq!(rows[1]["car"], "30");
    }

    #[test]
    fn test_quoted_cells_survive() {
        let rows = csv_to_rows("route,truck\n\"A, West\",9\nB,2", ',').unwrap();
        assert_eq!(rows[0]["route"], "A, West");
    }

    #[test]
    fn test_auto_detect_semicolon() {
        let result = parse_csv_str_auto("id_start;id_end;distance\n1;2;10").unwrap();
        assert_eq!(result.delimiter, ';');
        assert_eq!(result.headers, vec!["id_start", "id_end", "distance"]);
        assert_eq!(result.records[0]["distance"], "10");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            csv_to_rows("", ','),
            Err(CsvError::EmptyInput) | Err(CsvError::NoHeaders)
        ));
    }

    #[test]
    fn test_headers_only() {
        assert!(matches!(
            csv_to_rows("id_start,id_end,distance", ','),
            Err(CsvError::EmptyInput)
        ));
    }

    #[test]
    fn test_parse_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id_start,id_end,distance").unwrap();
        writeln!(file, "1,2,5").unwrap();
        writeln!(file, "2,3,10").unwrap();

        let result = parse_csv_file(file.path()).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1]["id_end"], "3");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_csv_file(Path::new("/nonexistent/input.csv")).unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
