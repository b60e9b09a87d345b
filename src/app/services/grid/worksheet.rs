//! In-memory worksheet

use super::{Cell, Grid};

/// A named worksheet held as rows of typed cells
///
/// Rows may be ragged; a position inside the sheet width but past the end of
/// a short row reads as [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    column_count: usize,
}

impl Worksheet {
    /// Create a worksheet from rows of cells
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            name: name.into(),
            rows,
            column_count,
        }
    }

    /// Create a worksheet from raw exported strings, typing every cell
    pub fn from_raw_rows<R, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|raw| Cell::from_raw(raw.as_ref()))
                    .collect::<Vec<Cell>>()
            })
            .collect();
        Self::new(name, rows)
    }

    /// Overwrite (growing the sheet if needed) the cell at (row, column)
    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize_with(column + 1, Cell::default);
        }
        cells[column] = cell;
        self.column_count = self.column_count.max(column + 1);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

static EMPTY: Cell = Cell::Empty;

impl Grid for Worksheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if column >= self.column_count {
            return None;
        }
        let cells = self.rows.get(row)?;
        Some(cells.get(column).unwrap_or(&EMPTY))
    }
}
