//! Curve sample storage
//!
//! The `~A` section is tokenised row by row into a single row-major buffer
//! when the document is read. Columns are only split out of that buffer the
//! first time a curve is requested, then cached for the life of the store.

mod decoder;

pub use decoder::MatrixDecoder;

use crate::error::{LasError, Result};
use once_cell::sync::OnceCell;
use rayon::prelude::*;

/// Columnar view over the decoded data matrix, one column per curve
#[derive(Debug)]
pub struct CurveStore {
    /// Row-major samples, `row_count * curve_count` values
    rows: Vec<f64>,
    curve_count: usize,
    row_count: usize,
    /// Lazily materialised columns, indexed by curve position
    columns: Vec<OnceCell<Vec<f64>>>,
}

impl CurveStore {
    /// Create a store from a row-major buffer.
    ///
    /// `rows.len()` must be a multiple of `curve_count`.
    pub fn from_rows(rows: Vec<f64>, curve_count: usize) -> Result<Self> {
        if curve_count == 0 {
            if !rows.is_empty() {
                return Err(LasError::InvalidDocument(format!(
                    "{} samples without any curve",
                    rows.len()
                )));
            }
            return Ok(Self::empty());
        }
        if rows.len() % curve_count != 0 {
            return Err(LasError::InvalidDocument(format!(
                "{} samples do not divide into {} curves",
                rows.len(),
                curve_count
            )));
        }
        let row_count = rows.len() / curve_count;
        Ok(Self {
            rows,
            curve_count,
            row_count,
            columns: (0..curve_count).map(|_| OnceCell::new()).collect(),
        })
    }

    /// Create a store from already separated columns of equal length
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        let curve_count = columns.len();
        let row_count = columns.first().map_or(0, Vec::len);
        if let Some((index, column)) = columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != row_count)
        {
            return Err(LasError::InvalidDocument(format!(
                "curve {} has {} samples, expected {}",
                index,
                column.len(),
                row_count
            )));
        }

        let mut rows = Vec::with_capacity(row_count * curve_count);
        for row in 0..row_count {
            rows.extend(columns.iter().map(|c| c[row]));
        }

        Ok(Self {
            rows,
            curve_count,
            row_count,
            columns: columns.into_iter().map(OnceCell::with_value).collect(),
        })
    }

    /// A store with no curves and no rows
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            curve_count: 0,
            row_count: 0,
            columns: Vec::new(),
        }
    }

    /// Number of complete rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of curves (columns)
    pub fn curve_count(&self) -> usize {
        self.curve_count
    }

    /// Samples of one curve, materialised on first access
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        let cell = self.columns.get(index)?;
        Some(cell.get_or_init(|| self.extract_column(index)))
    }

    /// Whether a column has already been materialised
    pub fn is_materialized(&self, index: usize) -> bool {
        self.columns.get(index).is_some_and(|c| c.get().is_some())
    }

    /// Materialise every column now.
    ///
    /// With `parallel` set each column is extracted on its own rayon task;
    /// each task only writes its own cell.
    pub fn materialize_all(&self, parallel: bool) {
        let fill = |(index, cell): (usize, &OnceCell<Vec<f64>>)| {
            cell.get_or_init(|| self.extract_column(index));
        };
        if parallel {
            self.columns.par_iter().enumerate().for_each(fill);
        } else {
            self.columns.iter().enumerate().for_each(fill);
        }
    }

    /// One row of samples in curve order
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.row_count {
            return None;
        }
        let start = index * self.curve_count;
        Some(&self.rows[start..start + self.curve_count])
    }

    /// Iterate over rows in file order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero; with no curves there are no rows either
        self.rows.chunks_exact(self.curve_count.max(1))
    }

    fn extract_column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .skip(index)
            .step_by(self.curve_count)
            .copied()
            .collect()
    }
}
