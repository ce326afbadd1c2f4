//! Tabular datasets: named, equal-length columns of numeric or categorical cells.
//!
//! A [`Dataset`] is immutable once built. It is created by the ingestion
//! boundary ([`Dataset::from_csv_str`] / [`Dataset::from_csv_path`]) and then
//! handed to a [`DatasetStore`](super::store::DatasetStore), which owns it for
//! the rest of the session.

use std::path::Path;

use serde::Serialize;

use crate::error::{DatasetError, FigureError};

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Numeric view of the cell. Text and missing cells have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Interpret a raw CSV cell.
    pub fn parse_cell(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
            return Value::Missing;
        }
        match s.parse::<f64>() {
            Ok(v) => Value::Number(v),
            Err(_) => Value::Text(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from named columns. All columns must have the same length
    /// and column names must be unique.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        for (i, col) in columns.iter().enumerate() {
            if col.values.len() != rows {
                return Err(DatasetError::LengthMismatch {
                    column: col.name.clone(),
                    expected: rows,
                    found: col.values.len(),
                });
            }
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(DatasetError::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Convenience constructor for all-numeric tables.
    pub fn from_numeric(columns: &[(&str, &[f64])]) -> Result<Self, DatasetError> {
        Self::new(
            columns
                .iter()
                .map(|(name, vals)| Column {
                    name: name.to_string(),
                    values: vals.iter().map(|v| Value::Number(*v)).collect(),
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`column`](Self::column) but reports an absent column as an error.
    pub fn require_column(&self, name: &str) -> Result<&Column, FigureError> {
        self.column(name)
            .ok_or_else(|| FigureError::MissingColumn(name.to_string()))
    }

    /// Numeric values of a column, `None` where the cell is missing or not a number.
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>, FigureError> {
        Ok(self
            .require_column(name)?
            .values
            .iter()
            .map(Value::as_f64)
            .collect())
    }

    /// Row-aligned `(x, y)` pairs in dataset row order. Rows where either cell is
    /// missing or non-numeric are dropped.
    pub fn xy_pairs(&self, x: &str, y: &str) -> Result<Vec<[f64; 2]>, FigureError> {
        let xs = self.numeric(x)?;
        let ys = self.numeric(y)?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .filter_map(|(x, y)| Some([x?, y?]))
            .collect())
    }

    /// Mean of the numeric cells of a column; `None` if it has none.
    pub fn column_mean(&self, name: &str) -> Result<Option<f64>, FigureError> {
        let vals: Vec<f64> = self.numeric(name)?.into_iter().flatten().collect();
        if vals.is_empty() {
            return Ok(None);
        }
        Ok(Some(vals.iter().sum::<f64>() / vals.len() as f64))
    }

    /// Parse a comma-delimited payload with a header row.
    ///
    /// When `index_column` is set the first column of every row is treated as a
    /// row index and discarded.
    pub fn from_csv_str(text: &str, index_column: bool) -> Result<Self, DatasetError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .filter(|(_, l)| !l.trim().is_empty());

        let (header_line, header) = lines.next().ok_or(DatasetError::EmptyHeader)?;
        let mut names = split_record(header).map_err(|message| DatasetError::Parse {
            line: header_line,
            message,
        })?;
        let skip = usize::from(index_column);
        if names.len() <= skip || names.iter().skip(skip).all(|n| n.trim().is_empty()) {
            return Err(DatasetError::EmptyHeader);
        }
        names.drain(..skip);

        let width = names.len() + skip;
        let mut values: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
        for (line, record) in lines {
            let cells =
                split_record(record).map_err(|message| DatasetError::Parse { line, message })?;
            if cells.len() != width {
                return Err(DatasetError::RaggedRow {
                    line,
                    expected: width,
                    found: cells.len(),
                });
            }
            for (col, cell) in values.iter_mut().zip(cells.iter().skip(skip)) {
                col.push(Value::parse_cell(cell));
            }
        }

        Self::new(
            names
                .into_iter()
                .zip(values)
                .map(|(name, values)| Column {
                    name: name.trim().to_string(),
                    values,
                })
                .collect(),
        )
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P, index_column: bool) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text, index_column)
    }

    /// Whether the header of `text` starts with an unnamed cell, as written for
    /// a row index by dataframe exports (blank, or `Unnamed: 0`).
    pub fn has_index_header(text: &str) -> bool {
        let Some(header) = text.lines().find(|l| !l.trim().is_empty()) else {
            return false;
        };
        match split_record(header.trim_end_matches('\r')) {
            Ok(cells) if cells.len() > 1 => {
                let first = cells[0].trim();
                first.is_empty() || first.starts_with("Unnamed:")
            }
            _ => false,
        }
    }
}

/// Split one CSV record, honouring double-quoted fields (`""` escapes a quote).
fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if cur.trim().is_empty() => {
                cur.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => out.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    out.push(cur);
    Ok(out)
}
