//! Solver result types and unified backend dispatch

use super::dpll::BacktrackingSolver;
use super::encoder::Encoding;
use super::enumerator::ExhaustiveSolver;
use super::oracle::OracleSolver;
use crate::config::SolverBackend;
use std::fmt;

/// A total satisfying assignment: one signed integer per variable, ordered
/// by variable id (positive = hazard, negative = safe)
pub type Model = Vec<i32>;

/// Three-way solving result. `BudgetExceeded` means the search was aborted
/// before reaching a conclusion and must never be read as unsatisfiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Satisfiable(Model),
    Unsatisfiable,
    BudgetExceeded,
}

impl SolveOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SolveOutcome::Satisfiable(model) => Some(model),
            _ => None,
        }
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Satisfiable(_) => write!(f, "satisfiable"),
            SolveOutcome::Unsatisfiable => write!(f, "unsatisfiable"),
            SolveOutcome::BudgetExceeded => write!(f, "budget exceeded"),
        }
    }
}

/// Build a total model from a partial assignment lookup; variables the
/// search never constrained default to false ("safe")
pub(crate) fn complete_model<F>(num_vars: usize, value: F) -> Model
where
    F: Fn(i32) -> bool,
{
    (1..=num_vars as i32)
        .map(|var| if value(var) { var } else { -var })
        .collect()
}

/// Unified interface over the three solving backends
pub enum UnifiedSolver {
    Exhaustive(ExhaustiveSolver),
    Backtracking(BacktrackingSolver),
    Oracle(OracleSolver),
}

impl UnifiedSolver {
    /// Create a solver instance for the given backend
    pub fn new(backend: SolverBackend, attempt_budget: u64) -> Self {
        match backend {
            SolverBackend::Exhaustive => {
                UnifiedSolver::Exhaustive(ExhaustiveSolver::new(attempt_budget))
            }
            SolverBackend::Backtracking => {
                UnifiedSolver::Backtracking(BacktrackingSolver::new(attempt_budget))
            }
            SolverBackend::Oracle => UnifiedSolver::Oracle(OracleSolver::new()),
        }
    }

    /// Human-readable backend name, used in output files and reports
    pub fn name(&self) -> &'static str {
        match self {
            UnifiedSolver::Exhaustive(_) => "Brute force",
            UnifiedSolver::Backtracking(_) => "Backtracking",
            UnifiedSolver::Oracle(_) => "Oracle",
        }
    }

    /// Run the backend over its own copy of the encoded formula
    pub fn solve(&self, encoding: &Encoding) -> SolveOutcome {
        match self {
            UnifiedSolver::Exhaustive(solver) => solver.solve(encoding),
            UnifiedSolver::Backtracking(solver) => solver.solve(encoding),
            UnifiedSolver::Oracle(solver) => solver.solve(encoding),
        }
    }
}
