//! Tabular grid access for ridership worksheets
//!
//! The ETL services only ever see a worksheet through the [`Grid`] trait:
//! typed cell access by (row, column) where an index past the sheet edge is
//! `None` rather than an error. [`Workbook`] is the concrete adapter, loading
//! a directory of CSV exports with one file per worksheet.
//!
//! - [`cell`] - Typed cell values
//! - [`worksheet`] - In-memory worksheet implementing [`Grid`]
//! - [`workbook`] - Named worksheets loaded from CSV files

pub mod cell;
pub mod workbook;
pub mod worksheet;

#[cfg(test)]
pub mod tests;

pub use cell::Cell;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Read access to a rectangular grid of typed cells
pub trait Grid {
    /// Worksheet name
    fn name(&self) -> &str;

    /// Number of rows in the grid
    fn row_count(&self) -> usize;

    /// Number of columns in the grid (width of the widest row)
    fn column_count(&self) -> usize;

    /// Cell at (row, column), or `None` when the index is out of bounds
    fn cell(&self, row: usize, column: usize) -> Option<&Cell>;

    /// Text of the cell at (row, column) if it is a text cell
    fn text(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column).and_then(Cell::as_text)
    }

    /// Value of the cell at (row, column) if it is a numeric cell
    fn number(&self, row: usize, column: usize) -> Option<f64> {
        self.cell(row, column).and_then(Cell::as_number)
    }

    /// All cells of a column from top to bottom
    fn column(&self, column: usize) -> Vec<&Cell> {
        (0..self.row_count())
            .filter_map(|row| self.cell(row, column))
            .collect()
    }
}
