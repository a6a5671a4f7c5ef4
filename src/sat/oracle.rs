//! External reference solver backed by CaDiCaL

use super::encoder::Encoding;
use super::solver::{complete_model, SolveOutcome};
use cadical::Solver;

/// Black-box oracle used to cross-check the from-scratch solvers. Only the
/// contract matters here: a satisfying model or a definitive UNSAT verdict.
pub struct OracleSolver;

impl OracleSolver {
    pub fn new() -> Self {
        Self
    }

    /// Load the formula into a fresh CaDiCaL instance and map its verdict
    /// onto the shared outcome taxonomy. An interrupted solve (no verdict)
    /// maps to `BudgetExceeded`, the only non-definitive variant.
    pub fn solve(&self, encoding: &Encoding) -> SolveOutcome {
        // CaDiCaL's API refuses empty clauses; they are UNSAT by definition
        if encoding.formula.has_empty_clause() {
            return SolveOutcome::Unsatisfiable;
        }

        let mut solver: Solver = Solver::new();
        for clause in encoding.formula.clauses() {
            solver.add_clause(clause.literals().iter().copied());
        }

        match solver.solve() {
            Some(true) => {
                let num_vars = encoding.variables.count();
                let model = complete_model(num_vars, |var| {
                    solver.value(var).unwrap_or(false)
                });
                SolveOutcome::Satisfiable(model)
            }
            Some(false) => SolveOutcome::Unsatisfiable,
            None => SolveOutcome::BudgetExceeded,
        }
    }
}

impl Default for OracleSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_grid_from_string;
    use crate::sat::encoder::CnfEncoder;
    use crate::sat::formula::{Clause, CnfFormula};
    use crate::sat::variables::VariableMap;

    fn raw_encoding(num_unknowns: usize, clauses: Vec<Clause>) -> Encoding {
        let row = vec!["_"; num_unknowns.max(1)].join(", ");
        let grid = parse_grid_from_string(&format!("{}\n", row)).unwrap();
        let mut formula = CnfFormula::new();
        formula.extend(clauses);
        Encoding {
            formula,
            variables: VariableMap::from_grid(&grid),
            infeasible_hints: Vec::new(),
        }
    }

    #[test]
    fn test_oracle_satisfiable() {
        let encoding = raw_encoding(
            2,
            vec![Clause::new(vec![1, 2]), Clause::new(vec![-1, 2])],
        );
        let outcome = OracleSolver::new().solve(&encoding);

        let model = outcome.model().expect("formula is satisfiable");
        assert!(encoding
            .formula
            .is_satisfied_by(|var| model[(var - 1) as usize] > 0));
    }

    #[test]
    fn test_oracle_unsatisfiable() {
        let encoding = raw_encoding(1, vec![Clause::unit(1), Clause::unit(-1)]);
        assert_eq!(OracleSolver::new().solve(&encoding), SolveOutcome::Unsatisfiable);
    }

    #[test]
    fn test_oracle_empty_clause_short_circuits() {
        let encoding = raw_encoding(2, vec![Clause::empty()]);
        assert_eq!(OracleSolver::new().solve(&encoding), SolveOutcome::Unsatisfiable);
    }

    #[test]
    fn test_oracle_agrees_with_backtracking() {
        let grid = parse_grid_from_string("1, _, _\n_, 2, _\n_, _, 1\n").unwrap();
        let encoding = CnfEncoder::encode(&grid);

        let oracle = OracleSolver::new().solve(&encoding);
        let dpll = crate::sat::BacktrackingSolver::default().solve(&encoding);

        assert!(oracle.is_satisfiable());
        assert!(dpll.is_satisfiable());
    }
}
