//! Row-major character grid produced by a conversion.

use std::fmt;

/// Row-major grid of output characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharGrid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl CharGrid {
    /// A zero-row grid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Grid of `rows * cols` cells, all `fill`.
    pub fn filled(rows: usize, cols: usize, fill: char) -> Self {
        Self { rows, cols, cells: vec![fill; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Set the cell at flat row-major `index`.
    pub(crate) fn set_index(&mut self, index: usize, c: char) {
        self.cells[index] = c;
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        (0..self.rows).filter_map(move |r| self.row(r))
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = CharGrid::empty();
        assert_eq!(grid.rows(), 0);
        assert!(grid.is_empty());
        assert_eq!(grid.to_string(), "");
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = CharGrid::filled(2, 3, '.');
        grid.set_index(4, '#');
        assert_eq!(grid.get(1, 1), Some('#'));
        assert_eq!(grid.row(1), Some(&['.', '#', '.'][..]));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.to_string(), "...\n.#.");
    }
}
