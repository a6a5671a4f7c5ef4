//! One puzzle instance driven end to end: encode, solve, decode, verify

use crate::config::Settings;
use crate::puzzle::{load_grid_from_file, Grid};
use crate::sat::{decode_model, CnfEncoder, Encoding, SolveOutcome, UnifiedSolver};
use crate::utils::ColorOutput;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Result of running one solver backend over one puzzle
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub solver_name: &'static str,
    pub outcome: SolveOutcome,
    /// Decoded grid, present iff the outcome is satisfiable
    pub solution: Option<Grid>,
    /// Oracle-independent consistency check of the decoded grid, when
    /// verification is enabled
    pub verified: Option<bool>,
    pub elapsed: Duration,
}

/// A single puzzle and the solver backends configured for it
pub struct PuzzleProblem {
    settings: Settings,
    grid: Grid,
    encoding: Encoding,
}

impl PuzzleProblem {
    /// Create a problem by loading the configured puzzle file
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;
        Ok(Self::with_grid(settings, grid))
    }

    /// Create a problem with an explicit grid (useful for testing and the
    /// batch driver)
    pub fn with_grid(settings: Settings, grid: Grid) -> Self {
        // Encode once; the encoding is shared read-only by all solvers
        let encoding = CnfEncoder::encode(&grid);
        Self {
            settings,
            grid,
            encoding,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Run every configured backend over its own copies of the grid and
    /// formula, decode satisfying models, and verify the decoded grids
    /// against the hints.
    pub fn solve_all(&self) -> Vec<SolverRun> {
        for &(row, col) in &self.encoding.infeasible_hints {
            eprintln!(
                "{}",
                ColorOutput::warning(&format!(
                    "Warning: hint at ({}, {}) exceeds its unknown neighbors; puzzle is unsatisfiable",
                    row, col
                ))
            );
        }

        let mut runs = Vec::with_capacity(self.settings.solver.backends.len());
        for &backend in &self.settings.solver.backends {
            let solver = UnifiedSolver::new(backend, self.settings.solver.attempt_budget);

            // Each solver run works on a private grid copy; the decoded
            // result never feeds back into the shared encoding
            let grid = self.grid.clone();

            let start = Instant::now();
            let outcome = solver.solve(&self.encoding);
            let elapsed = start.elapsed();

            let solution = outcome
                .model()
                .map(|model| decode_model(&grid, &self.encoding.variables, model));

            let verified = if self.settings.runner.verify_solutions {
                solution.as_ref().map(|solved| solved.is_fully_consistent())
            } else {
                None
            };

            if verified == Some(false) {
                eprintln!(
                    "{}",
                    ColorOutput::error(&format!(
                        "{}: decoded grid failed the consistency check",
                        solver.name()
                    ))
                );
            }

            runs.push(SolverRun {
                solver_name: solver.name(),
                outcome,
                solution,
                verified,
                elapsed,
            });
        }

        runs
    }
}
