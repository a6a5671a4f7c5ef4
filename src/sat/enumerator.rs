//! Exhaustive enumeration baseline solver

use super::encoder::Encoding;
use super::solver::{complete_model, SolveOutcome};

/// Default number of truth assignments tried before giving up
pub const DEFAULT_ATTEMPT_BUDGET: u64 = 2_000_000;

/// Brute-force solver: walks all 2^n truth assignments in increasing
/// bit-pattern order (variable 1 is the least-significant bit) up to an
/// attempt budget. Only useful for small instances and cross-validation.
pub struct ExhaustiveSolver {
    attempt_budget: u64,
}

impl ExhaustiveSolver {
    pub fn new(attempt_budget: u64) -> Self {
        Self { attempt_budget }
    }

    /// Returns the first satisfying assignment found. Reports
    /// `Unsatisfiable` only when the budget covered the entire assignment
    /// space; a budget cut-off is `BudgetExceeded`, never a UNSAT claim.
    pub fn solve(&self, encoding: &Encoding) -> SolveOutcome {
        let num_vars = encoding.variables.count();

        // Full space size, when it fits in a u64 counter
        let space: Option<u64> = if num_vars < 64 {
            Some(1u64 << num_vars)
        } else {
            None
        };
        let limit = space.map_or(self.attempt_budget, |s| s.min(self.attempt_budget));

        for bits in 0..limit {
            if encoding.formula.is_satisfied_by(|var| bit_value(bits, var)) {
                let model = complete_model(num_vars, |var| bit_value(bits, var));
                return SolveOutcome::Satisfiable(model);
            }
        }

        match space {
            Some(s) if s <= self.attempt_budget => SolveOutcome::Unsatisfiable,
            _ => SolveOutcome::BudgetExceeded,
        }
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPT_BUDGET)
    }
}

/// Truth value of a variable under the candidate bit pattern; variables
/// beyond the counter width read as false
#[inline]
fn bit_value(bits: u64, var: i32) -> bool {
    let idx = (var - 1) as u32;
    idx < 64 && (bits >> idx) & 1 == 1
}
