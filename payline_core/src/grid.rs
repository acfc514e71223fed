use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// Column-major symbol grid: `columns[col][row]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    columns: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Builds a grid from its columns. All columns must have the same height.
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> Option<Self> {
        let rows = columns.first().map(Vec::len)?;
        if rows == 0 || columns.iter().any(|c| c.len() != rows) {
            return None;
        }
        Some(Self { columns })
    }

    /// Builds a grid from its rows, top to bottom.
    pub fn from_rows(rows: &[Vec<Symbol>]) -> Option<Self> {
        let cols = rows.first().map(Vec::len)?;
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let columns = (0..cols)
            .map(|c| rows.iter().map(|r| r[c]).collect())
            .collect();
        Self::from_columns(columns)
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, col: usize) -> Option<&[Symbol]> {
        self.columns.get(col).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[Vec<Symbol>] {
        &self.columns
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Symbol> {
        self.columns.get(col)?.get(row).copied()
    }

    /// Symbols on `row`, left to right.
    pub fn row(&self, row: usize) -> Vec<Symbol> {
        self.columns.iter().filter_map(|c| c.get(row).copied()).collect()
    }

    /// Row-major symbol indices, the compact form used in reports.
    pub fn to_indices(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| self.row(r).into_iter().map(Symbol::to_index).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            let line: Vec<String> = self.row(r).iter().map(|s| s.to_string()).collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        Ok(())
    }
}
