use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular table of cells indexed `(row, col)`, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// All-empty grid of the given size.
    pub fn new(size: Coord2) -> Result<Self> {
        Self::from_array(Array2::default(size.to_nd_index()))
    }

    /// Grid where every cell holds `color`.
    pub fn filled(size: Coord2, color: Color) -> Result<Self> {
        Self::from_array(Array2::from_elem(size.to_nd_index(), Cell::Filled(color)))
    }

    pub fn from_array(cells: Array2<Cell>) -> Result<Self> {
        let grid = Self { cells };
        grid.validate()?;
        Ok(grid)
    }

    pub(crate) fn from_array_unchecked(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != cols) {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<Cell> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        let cells = Array2::from_shape_vec((rows.len(), cols), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_array(cells)
    }

    /// Parses one string per row, one color symbol per cell and `.` for empty. Whitespace is ignored.
    pub fn from_text_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(Cell::from_symbol)
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(&rows)
    }

    /// Checks the shape invariants, needed after deserializing.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.cells.dim();
        if rows == 0 || cols == 0 || rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(GameError::InvalidSize);
        }
        Ok(())
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    /// Index of the bottom row, the only clickable row under the default policy.
    pub fn bottom_row(&self) -> Coord {
        self.rows() - 1
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn filled_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| !cell.is_empty())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, col: Coord) -> impl Iterator<Item = Cell> + '_ {
        self.cells.column(col.into()).into_iter().copied()
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: Coord) -> impl Iterator<Item = Cell> + '_ {
        self.cells.row(row.into()).into_iter().copied()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn to_text_rows(&self) -> Vec<String> {
        (0..self.rows())
            .map(|row| self.row(row).map(Cell::symbol).collect())
            .collect()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                f.write_str("\n")?;
            }
            for cell in self.row(row) {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
