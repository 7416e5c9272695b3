//! The observation table: N rows × 8 columns in fixed order.
//!
//! RULE: A table is only ever built complete, by the generator.
//! There is no mutating API; once returned it never changes.

use crate::{
    error::{SimError, SimResult},
    stats,
    types::Column,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    columns: [Vec<f64>; 8],
}

impl ObservationTable {
    /// Assemble a table from fully computed columns, in `Column::ALL` order.
    pub(crate) fn from_columns(columns: [Vec<f64>; 8]) -> SimResult<Self> {
        let rows = columns[0].len();
        if let Some(col) = Column::ALL.iter().find(|c| columns[c.index()].len() != rows) {
            return Err(SimError::Other(anyhow::anyhow!(
                "column {col} has {} rows, expected {rows}",
                columns[col.index()].len()
            )));
        }
        Ok(Self { columns })
    }

    pub fn rows(&self) -> usize {
        self.columns[0].len()
    }

    pub fn column(&self, column: Column) -> &[f64] {
        &self.columns[column.index()]
    }

    /// One row as values in column order.
    pub fn row(&self, index: usize) -> Option<[f64; 8]> {
        if index >= self.rows() {
            return None;
        }
        Some(std::array::from_fn(|c| self.columns[c][index]))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = [f64; 8]> + '_ {
        (0..self.rows()).map(move |i| std::array::from_fn(|c| self.columns[c][i]))
    }

    /// Z-scored copy of one column.
    pub fn standardized(&self, column: Column) -> SimResult<Vec<f64>> {
        let values = self.column(column);
        if values.len() < 2 {
            return Err(SimError::InvalidSampleSize { samples: values.len() });
        }
        stats::standardize(values).ok_or(SimError::DegenerateColumn { column })
    }

    pub fn mean(&self, column: Column) -> f64 {
        stats::mean(self.column(column))
    }
}
