// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table View
//!
//! Positional read access to a grid of text cells. Scenario parsing only ever
//! reads through [`TableView`]; [`GridTable`] is the in-memory implementation
//! used for scenario bodies and for expanded tables handed to the interpreter.

use std::fmt::Debug;

/// Trait representing a read-only grid of text cells (zero-based).
///
/// Out-of-range access is the implementation's concern.
pub trait TableView: Debug {
    /// Text of the cell at `col` in `row`.
    fn cell_contents(&self, col: usize, row: usize) -> &str;

    /// Number of cells in `row`.
    fn column_count_in_row(&self, row: usize) -> usize;

    /// Number of rows in the table.
    fn row_count(&self) -> usize;
}

/// Rows of text cells held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridTable {
    rows: Vec<Vec<String>>,
}

impl GridTable {
    /// Build a table from anything that yields rows of cell text.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Copy rows `start..` of any table view into a new grid.
    pub fn from_view_rows(view: &dyn TableView, start: usize) -> Self {
        let rows = (start..view.row_count())
            .map(|row| {
                (0..view.column_count_in_row(row))
                    .map(|col| view.cell_contents(col, row).to_string())
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply `f` to every cell, producing a table of the same shape.
    pub fn map_cells<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| f(cell)).collect())
                .collect(),
        }
    }

    /// Render as `|a|b|` lines, for diagnostics.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("|{}|", row.join("|")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TableView for GridTable {
    fn cell_contents(&self, col: usize, row: usize) -> &str {
        &self.rows[row][col]
    }

    fn column_count_in_row(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }
}
