//! Grid representation and consistency checks for the hazard puzzle

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed row-major ordering of the 8-connected neighborhood deltas
const NEIGHBOR_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A single cell of the puzzle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Hidden cell whose content is to be determined
    Unknown,
    /// Resolved hazard (only appears in solved grids)
    Hazard,
    /// Resolved safe cell (only appears in solved grids)
    Safe,
    /// Revealed cell counting hazards among its neighbors
    Hint(u32),
}

impl Cell {
    /// Token used in the grid file format
    pub fn token(&self) -> String {
        match self {
            Cell::Unknown => "_".to_string(),
            Cell::Hazard => "H".to_string(),
            Cell::Safe => "S".to_string(),
            Cell::Hint(n) => n.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Cell::Unknown)
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, Cell::Hazard)
    }
}

/// Errors surfaced while constructing or parsing a grid
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid cannot be empty")]
    Empty,

    #[error("row {row} has length {len}, expected {expected} (all rows must have the same length)")]
    NotRectangular { row: usize, len: usize, expected: usize },

    #[error("hint {hint} at ({row}, {col}) exceeds its {neighbors} in-bounds neighbors")]
    MalformedHint { hint: u32, row: usize, col: usize, neighbors: usize },

    #[error("invalid cell token '{token}' at ({row}, {col})")]
    InvalidToken { token: String, row: usize, col: usize },
}

/// Rectangular puzzle grid; dimensions are fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid from a 2D cell array, validating shape and hint ranges
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(GridError::Empty);
        }

        let rows = cells.len();
        let cols = cells[0].len();

        for (row, line) in cells.iter().enumerate() {
            if line.len() != cols {
                return Err(GridError::NotRectangular {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
        }

        let grid = Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        };

        // A hint larger than the cell's whole neighborhood can never be met,
        // regardless of which cells turn out to be hazards.
        for r in 0..grid.rows {
            for c in 0..grid.cols {
                if let Cell::Hint(hint) = grid.get(r, c) {
                    let neighbors = grid.neighbors(r, c).len();
                    if hint as usize > neighbors {
                        return Err(GridError::MalformedHint { hint, row: r, col: c, neighbors });
                    }
                }
            }
        }

        Ok(grid)
    }

    /// Convert 2D coordinates to the flat index
    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Bounds check for signed coordinates
    pub fn is_valid(&self, row: isize, col: isize) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    /// Cell value at coordinates; callers stay in bounds
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Overwrite a cell; used only while decoding a model into a solved grid
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// The 8-connected in-bounds neighbors of a cell, in fixed row-major
    /// delta order
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);
        for (dr, dc) in NEIGHBOR_DELTAS {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if self.is_valid(r, c) {
                result.push((r as usize, c as usize));
            }
        }
        result
    }

    /// Count neighbors currently marked as hazards
    pub fn hazard_count(&self, row: usize, col: usize) -> u32 {
        self.neighbors(row, col)
            .into_iter()
            .filter(|&(r, c)| self.get(r, c).is_hazard())
            .count() as u32
    }

    /// Check that every hint cell sees exactly as many hazards as it claims
    pub fn is_fully_consistent(&self) -> bool {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Cell::Hint(hint) = self.get(row, col) {
                    if self.hazard_count(row, col) != hint {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Positions of all unknown cells in row-major order
    pub fn unknown_positions(&self) -> Vec<(usize, usize)> {
        let mut positions = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.get(row, col).is_unknown() {
                    positions.push((row, col));
                }
            }
        }
        positions
    }

    /// Count of unknown cells
    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_unknown()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let tokens: Vec<String> = (0..self.cols).map(|col| self.get(row, col).token()).collect();
            writeln!(f, "{}", tokens.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3() -> Grid {
        Grid::from_cells(vec![
            vec![Cell::Hint(1), Cell::Unknown, Cell::Unknown],
            vec![Cell::Unknown, Cell::Hint(2), Cell::Unknown],
            vec![Cell::Unknown, Cell::Unknown, Cell::Hint(1)],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_construction() {
        let grid = grid_3x3();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.unknown_count(), 6);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Grid::from_cells(vec![
            vec![Cell::Unknown, Cell::Unknown],
            vec![Cell::Unknown],
        ]);
        assert!(matches!(result, Err(GridError::NotRectangular { row: 1, .. })));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(Grid::from_cells(vec![]), Err(GridError::Empty)));
    }

    #[test]
    fn test_impossible_hint_rejected() {
        // Corner cell has only 3 neighbors, a hint of 5 there can never hold
        let result = Grid::from_cells(vec![
            vec![Cell::Hint(5), Cell::Unknown],
            vec![Cell::Unknown, Cell::Unknown],
        ]);
        assert!(matches!(result, Err(GridError::MalformedHint { hint: 5, .. })));
    }

    #[test]
    fn test_neighbors_deterministic_order() {
        let grid = grid_3x3();
        assert_eq!(
            grid.neighbors(1, 1),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
        // Corner cell sees only its in-bounds neighbors
        assert_eq!(grid.neighbors(0, 0), vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_hazard_count_and_consistency() {
        let mut grid = grid_3x3();
        assert_eq!(grid.hazard_count(0, 0), 0);

        grid.set(0, 1, Cell::Hazard);
        grid.set(1, 0, Cell::Safe);
        grid.set(1, 2, Cell::Hazard);
        grid.set(2, 0, Cell::Safe);
        grid.set(0, 2, Cell::Safe);
        grid.set(2, 1, Cell::Safe);

        assert_eq!(grid.hazard_count(0, 0), 1);
        assert_eq!(grid.hazard_count(1, 1), 2);
        assert_eq!(grid.hazard_count(2, 2), 1);
        assert!(grid.is_fully_consistent());

        grid.set(0, 1, Cell::Safe);
        assert!(!grid.is_fully_consistent());
    }

    #[test]
    fn test_unknown_positions_row_major() {
        let grid = grid_3x3();
        assert_eq!(
            grid.unknown_positions(),
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }
}
