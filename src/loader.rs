use crate::config::{ABSENT_MARKER, PROGRESS_INTERVAL};
use crate::error::{RelgraphError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// One spreadsheet row. Cells line up with [`Table::headers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zero-based position among the loaded (non-blank) rows
    pub index: usize,
    cells: Vec<Option<String>>,
}

impl Record {
    /// Cell text, or `None` when the cell is absent.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

/// A loaded sheet: headers in source order plus the data rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table from raw rows. Blank rows are dropped and short rows padded.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let mut records = Vec::with_capacity(rows.len());
        for mut cells in rows {
            if cells.iter().all(Option::is_none) {
                continue;
            }
            if cells.len() < width {
                cells.resize(width, None);
            }
            records.push(Record {
                index: records.len(),
                cells,
            });
        }
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the column with exactly this header.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| RelgraphError::FieldMissing(name.to_string()))
    }
}

/// Read a CSV file or the first worksheet of a workbook.
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(RelgraphError::SourceNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    info!("Loading rows from: {}", path.display());

    let table = match ext.as_deref() {
        Some("csv") => load_csv(path)?,
        Some(e) if WORKBOOK_EXTENSIONS.contains(&e) => load_workbook(path)?,
        _ => return Err(unreadable(path, "unsupported file extension")),
    };

    info!(
        columns = table.headers.len(),
        rows = table.len(),
        "Rows loaded"
    );
    Ok(table)
}

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| unreadable(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| unreadable(path, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| header_text(i, h.trim_start_matches('\u{feff}')))
        .collect();

    let pb = ProgressBar::new_spinner();
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| unreadable(path, e))?;
        rows.push(record.iter().map(|c| cell_text(c.to_string())).collect());
        if rows.len() % PROGRESS_INTERVAL == 0 {
            pb.tick();
        }
    }
    pb.finish_and_clear();

    Ok(Table::from_rows(headers, rows))
}

fn load_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable(path, "workbook has no worksheets"))?
        .map_err(|e| unreadable(path, e))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(row) => row
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => header_text(i, ""),
                other => header_text(i, &other.to_string()),
            })
            .collect(),
        None => Vec::new(),
    };
    debug!(headers = ?headers, "Worksheet headers");

    let pb = ProgressBar::new_spinner();
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for row in sheet_rows {
        rows.push(row.iter().map(cell_data).collect());
        if rows.len() % PROGRESS_INTERVAL == 0 {
            pb.tick();
        }
    }
    pb.finish_and_clear();

    Ok(Table::from_rows(headers, rows))
}

fn header_text(index: usize, text: &str) -> String {
    if text.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        text.to_string()
    }
}

fn cell_data(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => cell_text(s.clone()),
        other => Some(other.to_string()),
    }
}

fn cell_text(text: String) -> Option<String> {
    if text.is_empty() || text == ABSENT_MARKER {
        None
    } else {
        Some(text)
    }
}

fn unreadable(path: &Path, reason: impl ToString) -> RelgraphError {
    RelgraphError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
