//! DPLL-style backtracking solver with unit propagation

use super::encoder::Encoding;
use super::formula::Clause;
use super::solver::{complete_model, SolveOutcome};
use std::collections::HashMap;

/// Default number of search steps before the whole search aborts
pub const DEFAULT_STEP_BUDGET: u64 = 2_000_000;

/// Partial truth assignment built during search
type Assignment = HashMap<i32, bool>;

/// The production solving path: DPLL search over an explicit work stack,
/// with unit propagation run to a fixed point before every branching
/// decision.
///
/// The explicit stack avoids call-stack depth limits on pathological
/// inputs. Simplification keeps one invariant throughout: every literal
/// still present in a remaining clause is unassigned, so a unit clause is
/// exactly a clause of length one.
pub struct BacktrackingSolver {
    step_budget: u64,
}

impl BacktrackingSolver {
    pub fn new(step_budget: u64) -> Self {
        Self { step_budget }
    }

    /// Solve over a private copy of the encoded formula. Exceeding the step
    /// budget aborts the whole search with `BudgetExceeded`, which the
    /// caller must not conflate with `Unsatisfiable`.
    pub fn solve(&self, encoding: &Encoding) -> SolveOutcome {
        let num_vars = encoding.variables.count();
        let clauses = encoding.formula.clauses().to_vec();

        let mut stack: Vec<(Vec<Clause>, Assignment)> = vec![(clauses, Assignment::new())];
        let mut steps: u64 = 0;

        while let Some((mut clauses, mut assignment)) = stack.pop() {
            steps += 1;
            if steps > self.step_budget {
                return SolveOutcome::BudgetExceeded;
            }

            if !Self::unit_propagate(&mut clauses, &mut assignment) {
                // Conflict: this branch is unsatisfiable, backtrack
                continue;
            }

            if clauses.is_empty() {
                // Every clause satisfied; unconstrained variables stay safe
                let model = complete_model(num_vars, |var| {
                    assignment.get(&var).copied().unwrap_or(false)
                });
                return SolveOutcome::Satisfiable(model);
            }

            // No heuristic: branch on the first literal of the first
            // remaining clause, deterministic and reproducible
            let variable = clauses[0].literals()[0].abs();

            // True is tried first, so its work item is pushed last
            for value in [false, true] {
                if let Some(simplified) = Self::assign_and_simplify(&clauses, variable, value) {
                    let mut next = assignment.clone();
                    next.insert(variable, value);
                    stack.push((simplified, next));
                }
            }
        }

        SolveOutcome::Unsatisfiable
    }

    /// Run unit propagation to a fixed point. Returns false on conflict
    /// (some clause became empty).
    fn unit_propagate(clauses: &mut Vec<Clause>, assignment: &mut Assignment) -> bool {
        loop {
            if clauses.iter().any(Clause::is_empty) {
                return false;
            }

            let Some(literal) = clauses
                .iter()
                .find(|c| c.is_unit())
                .map(|c| c.literals()[0])
            else {
                return true;
            };

            // Force the variable to the polarity satisfying the unit clause
            assignment.insert(literal.abs(), literal > 0);
            clauses.retain(|c| !c.contains(literal));
            for clause in clauses.iter_mut() {
                clause.remove(-literal);
            }
        }
    }

    /// Simplify the clause set under `variable = value`: drop satisfied
    /// clauses, strip falsified literals. Returns None if an empty clause
    /// appears, pruning the branch before it is pushed.
    fn assign_and_simplify(
        clauses: &[Clause],
        variable: i32,
        value: bool,
    ) -> Option<Vec<Clause>> {
        let satisfied = if value { variable } else { -variable };
        let falsified = -satisfied;

        let mut simplified = Vec::with_capacity(clauses.len());
        for clause in clauses {
            if clause.contains(satisfied) {
                continue;
            }
            let mut clause = clause.clone();
            clause.remove(falsified);
            if clause.is_empty() {
                return None;
            }
            simplified.push(clause);
        }

        Some(simplified)
    }
}

impl Default for BacktrackingSolver {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_BUDGET)
    }
}
