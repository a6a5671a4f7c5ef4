//! Model decoder: satisfying assignment back onto the grid

use super::solver::Model;
use super::variables::VariableMap;
use crate::puzzle::{Cell, Grid};

/// Map a model onto the grid: every unknown cell becomes `Hazard` (its
/// variable is positive in the model) or `Safe` (negative or absent — a
/// variable never constrained by any clause stays safe).
///
/// Pure function: the input grid is untouched, a solved copy is returned.
pub fn decode_model(grid: &Grid, variables: &VariableMap, model: &Model) -> Grid {
    let mut solved = grid.clone();

    for &literal in model {
        if let Some((row, col)) = variables.position(literal) {
            let cell = if literal > 0 { Cell::Hazard } else { Cell::Safe };
            solved.set(row, col, cell);
        }
    }

    // Unknown cells whose variable the model never mentioned
    for (row, col) in solved.unknown_positions() {
        solved.set(row, col, Cell::Safe);
    }

    solved
}
