//! Dense row-major matrices for observations and causal scores.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CausalError, ErrorInfo};

fn checked_len(rows: usize, cols: usize, code: &str) -> Result<usize, CausalError> {
    rows.checked_mul(cols).ok_or_else(|| {
        CausalError::Data(
            ErrorInfo::new(code, "matrix shape overflows usize")
                .with_context("rows", rows.to_string())
                .with_context("cols", cols.to_string()),
        )
    })
}

/// Observation table with `rows × cols` numeric entries stored row-major.
///
/// Only the column count takes part in score estimation; the values are kept
/// so the table can be inspected and persisted alongside a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ObservationMatrix {
    /// Creates a table from explicit dimensions and row-major values.
    pub fn from_shape(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, CausalError> {
        let expected = checked_len(rows, cols, "observation-shape")?;
        if values.len() != expected {
            return Err(CausalError::Data(
                ErrorInfo::new(
                    "observation-shape",
                    format!("expected {expected} values, found {}", values.len()),
                )
                .with_context("rows", rows.to_string())
                .with_context("cols", cols.to_string()),
            ));
        }
        Ok(Self { rows, cols, values })
    }

    /// Creates a table from a list of rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CausalError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut values = Vec::with_capacity(row_count * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(CausalError::Data(
                    ErrorInfo::new("observation-ragged", "rows must share one column count")
                        .with_context("row", index.to_string())
                        .with_context("expected", cols.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
            values.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            values,
        })
    }

    /// Creates an all-zero table with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, CausalError> {
        let len = checked_len(rows, cols, "observation-shape")?;
        Ok(Self {
            rows,
            cols,
            values: vec![0.0; len],
        })
    }

    /// Number of observation rows.
    pub fn nrow(&self) -> usize {
        self.rows
    }

    /// Number of observed variables.
    pub fn ncol(&self) -> usize {
        self.cols
    }

    /// Returns a single row of observations.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        Some(&self.values[start..start + self.cols])
    }

    /// Returns the raw row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Reads a numeric CSV table. With `has_headers` the header row only
    /// contributes the column count.
    pub fn read_csv(path: &Path, has_headers: bool) -> Result<Self, CausalError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|err| CausalError::serde_at("observation-open", err, path))?;
        let header_cols = if has_headers {
            let headers = reader
                .headers()
                .map_err(|err| CausalError::serde_at("observation-headers", err, path))?;
            Some(headers.len())
        } else {
            None
        };
        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record =
                record.map_err(|err| CausalError::serde_at("observation-read", err, path))?;
            rows.push(parse_record(&record, line, path)?);
        }
        match (rows.is_empty(), header_cols) {
            (true, Some(cols)) => Self::zeros(0, cols),
            _ => Self::from_rows(rows),
        }
    }
}

/// Square `dim × dim` score matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreMatrix")]
pub struct ScoreMatrix {
    dim: usize,
    values: Vec<f64>,
}

/// Unchecked wire form; shape is validated by [`ScoreMatrix::from_row_major`].
#[derive(Deserialize)]
struct RawScoreMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl TryFrom<RawScoreMatrix> for ScoreMatrix {
    type Error = CausalError;

    fn try_from(raw: RawScoreMatrix) -> Result<Self, Self::Error> {
        Self::from_row_major(raw.dim, raw.values)
    }
}

impl ScoreMatrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    /// Creates a matrix from row-major values.
    pub fn from_row_major(dim: usize, values: Vec<f64>) -> Result<Self, CausalError> {
        let expected = checked_len(dim, dim, "score-shape")?;
        if values.len() != expected {
            return Err(CausalError::Data(
                ErrorInfo::new(
                    "score-shape",
                    format!("expected {expected} values, found {}", values.len()),
                )
                .with_context("dim", dim.to_string()),
            ));
        }
        Ok(Self { dim, values })
    }

    /// Side length of the matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns entry `(i, j)`. Panics when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.offset(i, j)]
    }

    /// Overwrites entry `(i, j)`. Panics when out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let offset = self.offset(i, j);
        self.values[offset] = value;
    }

    /// Adds `other` element-wise into `self`.
    pub fn accumulate(&mut self, other: &ScoreMatrix) {
        debug_assert_eq!(self.dim, other.dim);
        for (total, sample) in self.values.iter_mut().zip(&other.values) {
            *total += sample;
        }
    }

    /// Divides every entry by `denominator` with IEEE-754 semantics.
    pub fn divide_all(&mut self, denominator: f64) {
        for value in &mut self.values {
            *value /= denominator;
        }
    }

    /// Returns the raw row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunk size must be non-zero; an empty 0x0 buffer yields no rows.
        self.values.chunks(self.dim.max(1))
    }

    /// Returns true if every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|value| value.is_finite())
    }

    /// Writes the matrix as a headerless CSV, creating parent directories.
    /// Non-finite entries are written as `NaN`, `inf` or `-inf` so they
    /// survive a round trip.
    pub fn write_csv(&self, path: &Path) -> Result<(), CausalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| CausalError::serde_at("scores-mkdir", err, parent))?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|err| CausalError::serde_at("scores-create", err, path))?;
        for row in self.rows() {
            writer
                .write_record(row.iter().map(|value| value.to_string()))
                .map_err(|err| CausalError::serde_at("scores-write", err, path))?;
        }
        writer
            .flush()
            .map_err(|err| CausalError::serde_at("scores-write", err, path))
    }

    /// Reads a matrix previously written by [`ScoreMatrix::write_csv`].
    pub fn read_csv(path: &Path) -> Result<Self, CausalError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|err| CausalError::serde_at("scores-open", err, path))?;
        let mut values = Vec::new();
        let mut rows = 0usize;
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|err| CausalError::serde_at("scores-read", err, path))?;
            values.extend(parse_record(&record, line, path)?);
            rows += 1;
        }
        Self::from_row_major(rows, values)
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.dim && j < self.dim,
            "index ({i}, {j}) out of bounds for {0}x{0} matrix",
            self.dim
        );
        i * self.dim + j
    }
}

fn parse_record(
    record: &csv::StringRecord,
    line: usize,
    path: &Path,
) -> Result<Vec<f64>, CausalError> {
    record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            field.parse::<f64>().map_err(|err| {
                CausalError::Data(
                    ErrorInfo::new("non-numeric-field", err.to_string())
                        .with_context("path", path.display().to_string())
                        .with_context("record", line.to_string())
                        .with_context("column", column.to_string())
                        .with_context("field", field.to_string()),
                )
            })
        })
        .collect()
}
