//! CNF encoder: hint cells to exactly-k cardinality clauses

use super::formula::{Clause, CnfFormula};
use super::variables::{Position, VariableMap};
use crate::puzzle::{Cell, Grid};
use itertools::Itertools;
use std::fmt;

/// The product of encoding one grid: a CNF formula, the position mapping it
/// was built against, and any hints that were infeasible by construction.
///
/// Shared read-only by all solvers; each solver copies the formula before
/// simplifying it.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub formula: CnfFormula,
    pub variables: VariableMap,
    /// Hint cells whose value exceeds their unknown-neighbor count. Not an
    /// error: the emitted empty clause already forces the formula UNSAT.
    pub infeasible_hints: Vec<Position>,
}

impl Encoding {
    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            variable_count: self.variables.count(),
            clause_count: self.formula.len(),
            infeasible_hints: self.infeasible_hints.len(),
        }
    }
}

/// Encodes puzzle grids into CNF formulas
pub struct CnfEncoder;

impl CnfEncoder {
    /// Encode a grid: assign variables to unknown cells in row-major order,
    /// then emit a clause set per hint cell forcing "exactly k of its
    /// unknown neighbors are hazards". Clauses are deduplicated as literal
    /// sets across the whole formula.
    ///
    /// Encoding is deterministic: the same grid always yields the same
    /// mapping and the same clause set.
    pub fn encode(grid: &Grid) -> Encoding {
        let variables = VariableMap::from_grid(grid);
        let mut formula = CnfFormula::new();
        let mut infeasible_hints = Vec::new();

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let Cell::Hint(hint) = grid.get(row, col) else {
                    continue;
                };

                let neighbor_vars: Vec<i32> = grid
                    .neighbors(row, col)
                    .into_iter()
                    .filter_map(|pos| variables.variable(pos))
                    .collect();

                if hint as usize > neighbor_vars.len() {
                    // More hazards demanded than hidden neighbors exist; the
                    // empty clause makes the whole formula unsatisfiable.
                    infeasible_hints.push((row, col));
                    formula.add_clause(Clause::empty());
                    continue;
                }

                formula.extend(Self::exactly_k_clauses(&neighbor_vars, hint as usize));
            }
        }

        Encoding {
            formula,
            variables,
            infeasible_hints,
        }
    }

    /// Clause families forcing "exactly k of `vars` are true".
    ///
    /// At-least-k: every (n-k+1)-subset as an all-positive clause — if fewer
    /// than k were true, some such subset would be entirely false.
    /// At-most-k (when n-k > 0): every (k+1)-subset as an all-negative
    /// clause — if more than k were true, some such subset would be entirely
    /// true. Binomial enumeration is fine here: n is bounded by the
    /// 8-connected neighborhood.
    fn exactly_k_clauses(vars: &[i32], k: usize) -> Vec<Clause> {
        let n = vars.len();
        debug_assert!(k <= n);

        let mut clauses: Vec<Clause> = vars
            .iter()
            .copied()
            .combinations(n - k + 1)
            .map(Clause::new)
            .collect();

        if n - k > 0 {
            clauses.extend(
                vars.iter()
                    .map(|&v| -v)
                    .combinations(k + 1)
                    .map(Clause::new),
            );
        }

        clauses
    }
}

/// Summary of one encoding run
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub infeasible_hints: usize,
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        if self.infeasible_hints > 0 {
            writeln!(f, "  Infeasible hints: {}", self.infeasible_hints)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_grid_from_string;

    #[test]
    fn test_single_neighbor_hint() {
        // The hint at (0,0) has exactly one unknown neighbor, (0,1);
        // (0,2) is outside its neighborhood.
        let grid = parse_grid_from_string("1, _, _\n").unwrap();
        let encoding = CnfEncoder::encode(&grid);

        assert_eq!(encoding.variables.count(), 2);
        assert_eq!(encoding.formula.clauses(), &[Clause::unit(1)]);
        assert!(encoding.infeasible_hints.is_empty());
    }

    #[test]
    fn test_exactly_one_of_three() {
        let clauses = CnfEncoder::exactly_k_clauses(&[1, 2, 3], 1);

        // At-least-1: one all-positive clause over all three variables.
        // At-most-1: all three negative pairs.
        assert_eq!(clauses.len(), 4);
        assert!(clauses.contains(&Clause::new(vec![1, 2, 3])));
        assert!(clauses.contains(&Clause::new(vec![-1, -2])));
        assert!(clauses.contains(&Clause::new(vec![-1, -3])));
        assert!(clauses.contains(&Clause::new(vec![-2, -3])));
    }

    #[test]
    fn test_k_equals_n_has_no_at_most_family() {
        let clauses = CnfEncoder::exactly_k_clauses(&[1, 2], 2);
        // Both variables forced true by unit clauses
        assert_eq!(clauses, vec![Clause::unit(1), Clause::unit(2)]);
    }

    #[test]
    fn test_zero_hint_forces_all_safe() {
        let clauses = CnfEncoder::exactly_k_clauses(&[1, 2], 0);
        assert_eq!(clauses, vec![Clause::unit(-1), Clause::unit(-2)]);
    }

    #[test]
    fn test_infeasible_hint_emits_empty_clause() {
        // The hint at (0,0) wants one hazard but its only neighbor is a hint
        let grid = parse_grid_from_string("1, 0\n").unwrap();
        let encoding = CnfEncoder::encode(&grid);

        assert_eq!(encoding.infeasible_hints, vec![(0, 0)]);
        assert!(encoding.formula.has_empty_clause());
    }

    #[test]
    fn test_no_unknowns_encodes_empty_formula() {
        let grid = parse_grid_from_string("0, 0\n").unwrap();
        let encoding = CnfEncoder::encode(&grid);

        assert!(encoding.formula.is_empty());
        assert!(encoding.variables.is_empty());
        assert!(encoding.infeasible_hints.is_empty());
    }

    #[test]
    fn test_shared_neighborhood_clauses_deduplicated() {
        // Both hints constrain the same two unknowns, producing identical
        // clause sets that must collapse to one copy each.
        let grid = parse_grid_from_string("1, 1\n_, _\n").unwrap();
        let encoding = CnfEncoder::encode(&grid);

        assert_eq!(encoding.formula.len(), 2);
        assert!(encoding.formula.clauses().contains(&Clause::new(vec![1, 2])));
        assert!(encoding.formula.clauses().contains(&Clause::new(vec![-1, -2])));
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let grid = parse_grid_from_string("1, _, _\n_, 2, _\n_, _, 1\n").unwrap();
        let first = CnfEncoder::encode(&grid);
        let second = CnfEncoder::encode(&grid);

        assert_eq!(first.variables, second.variables);
        assert_eq!(first.formula, second.formula);
    }
}
