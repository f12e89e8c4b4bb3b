use crate::ExtractionError;
use csv::ReaderBuilder;
use tracing::warn;

/// Parsed CSV with header order preserved
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    /// Rows by original position; `None` where the row failed to parse
    pub rows: Vec<Option<Vec<String>>>,
}

impl CsvTable {
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Trimmed cell value; missing columns and blank cells are `None`
    pub fn cell<'a>(&self, row: &'a [String], header: &str) -> Option<&'a str> {
        let index = self.column(header)?;
        row.get(index)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

pub struct CsvParser {
    delimiter: u8,
    has_headers: bool,
}

impl CsvParser {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::new()
        }
    }

    pub fn parse_table(&self, content: &[u8]) -> Result<CsvTable, ExtractionError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(true)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            match result {
                Ok(record) => rows.push(Some(record.iter().map(str::to_string).collect())),
                Err(e) => {
                    warn!("Failed to parse CSV row {}: {}", index, e);
                    rows.push(None);
                }
            }
        }

        Ok(CsvTable { headers, rows })
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}
