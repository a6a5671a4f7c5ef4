//! Variable management for the SAT encoding

use crate::puzzle::Grid;
use std::collections::HashMap;

/// Grid coordinates of an unknown cell
pub type Position = (usize, usize);

/// Bijective mapping between unknown-cell positions and SAT variable ids.
///
/// Built in a single row-major pass, so ids are dense starting at 1 and
/// re-encoding the same grid always produces the same mapping. Never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMap {
    pos_to_var: HashMap<Position, i32>,
    var_to_pos: Vec<Position>,
}

impl VariableMap {
    /// Assign a fresh variable to every unknown cell, in row-major order
    pub fn from_grid(grid: &Grid) -> Self {
        let positions = grid.unknown_positions();
        let pos_to_var = positions
            .iter()
            .enumerate()
            .map(|(idx, &pos)| (pos, idx as i32 + 1))
            .collect();

        Self {
            pos_to_var,
            var_to_pos: positions,
        }
    }

    /// Variable id for a position, if the position holds an unknown cell
    pub fn variable(&self, pos: Position) -> Option<i32> {
        self.pos_to_var.get(&pos).copied()
    }

    /// Position for a variable id or literal (sign is ignored)
    pub fn position(&self, literal: i32) -> Option<Position> {
        let var = literal.unsigned_abs() as usize;
        if var == 0 {
            return None;
        }
        self.var_to_pos.get(var - 1).copied()
    }

    /// Total number of variables
    pub fn count(&self) -> usize {
        self.var_to_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.var_to_pos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_grid_from_string;

    #[test]
    fn test_dense_row_major_ids() {
        let grid = parse_grid_from_string("1, _, _\n_, 2, _\n").unwrap();
        let map = VariableMap::from_grid(&grid);

        assert_eq!(map.count(), 4);
        assert_eq!(map.variable((0, 1)), Some(1));
        assert_eq!(map.variable((0, 2)), Some(2));
        assert_eq!(map.variable((1, 0)), Some(3));
        assert_eq!(map.variable((1, 2)), Some(4));

        // Hint cells hold no variable
        assert_eq!(map.variable((0, 0)), None);
        assert_eq!(map.variable((1, 1)), None);
    }

    #[test]
    fn test_position_lookup_ignores_sign() {
        let grid = parse_grid_from_string("1, _, _\n").unwrap();
        let map = VariableMap::from_grid(&grid);

        assert_eq!(map.position(1), Some((0, 1)));
        assert_eq!(map.position(-1), Some((0, 1)));
        assert_eq!(map.position(2), Some((0, 2)));
        assert_eq!(map.position(3), None);
        assert_eq!(map.position(0), None);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let grid = parse_grid_from_string("_, 1, _\n_, _, 2\n").unwrap();
        assert_eq!(VariableMap::from_grid(&grid), VariableMap::from_grid(&grid));
    }

    #[test]
    fn test_no_unknowns() {
        let grid = parse_grid_from_string("0, 0\n").unwrap();
        let map = VariableMap::from_grid(&grid);
        assert!(map.is_empty());
    }
}
