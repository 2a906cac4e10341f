//! Tab-separated tables keyed by their first column.
//!
//! Expression matrices, rank files and the engine's result tables all share
//! the same layout: a header row, then one row per entry whose first field is
//! the row key (a gene identifier or the engine's row index). Cells are kept
//! as text so whatever the engine emits is written back unchanged.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use getset::Getters;
use itertools::Itertools;
use tracing::{debug, warn};

use crate::error::{PathrevError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Table {
    /// header of the key column, empty for an unnamed index
    #[getset(get = "pub")]
    index_name: String,
    #[getset(get = "pub")]
    columns: Vec<String>,
    #[getset(get = "pub")]
    rows: Vec<Row>,
}

impl Table {
    pub fn new(index_name: impl Into<String>, columns: Vec<String>) -> Self {
        Table {
            index_name: index_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, key: impl Into<String>, values: Vec<String>) -> Result<()> {
        let key = key.into();
        if values.len() != self.columns.len() {
            return Err(PathrevError::InvalidArgument(format!(
                "row '{}' has {} values, table has {} columns",
                key,
                values.len(),
                self.columns.len()
            )));
        }
        self.rows.push(Row { key, values });
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, not counting the key column.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }

    /// All cells of the named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row.values[idx].as_str()).collect())
    }

    pub fn duplicate_keys(&self) -> Vec<&str> {
        self.keys().duplicates().collect()
    }
}

/// Read a TSV table from `path`, using the first column as the row key.
///
/// # Errors
/// Returns `InputParse` if the file cannot be opened, has no header row,
/// has rows of differing width, or is not valid UTF-8.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let parse_error = |reason: String| PathrevError::InputParse {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| parse_error(e.to_string()))?;
    let table = parse_table(file).map_err(parse_error)?;

    let duplicates = table.duplicate_keys();
    if !duplicates.is_empty() {
        warn!(
            path = %path.display(),
            count = duplicates.len(),
            first = duplicates[0],
            "table has duplicated row keys"
        );
    }
    debug!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_cols(),
        "loaded table"
    );
    Ok(table)
}

fn parse_table<R: Read>(reader: R) -> std::result::Result<Table, String> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);

    let header = rdr.headers().map_err(|e| e.to_string())?.clone();
    let mut fields = header.iter();
    let index_name = fields.next().ok_or("missing header row")?;
    let mut table = Table::new(index_name, fields.map(str::to_string).collect());

    for record in rdr.records() {
        let record = record.map_err(|e| e.to_string())?;
        let mut fields = record.iter();
        // the reader rejects ragged rows, so the key is always present
        let key = fields.next().unwrap_or_default().to_string();
        table.rows.push(Row {
            key,
            values: fields.map(str::to_string).collect(),
        });
    }

    Ok(table)
}

/// Write `table` as TSV: header row first, key column first.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    wtr.write_record(std::iter::once(&table.index_name).chain(table.columns.iter()))
        .map_err(|e| PathrevError::Io(e.into()))?;
    for row in table.rows.iter() {
        wtr.write_record(std::iter::once(&row.key).chain(row.values.iter()))
            .map_err(|e| PathrevError::Io(e.into()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_table_to_path<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_table(table, file)
}
