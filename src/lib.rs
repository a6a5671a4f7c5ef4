//! Hazard Hunter SAT Solver
//!
//! This library solves a grid-based logic puzzle (which hidden cells contain
//! a hazard, given numeric hints counting adjacent hazards) by reducing it to
//! Boolean satisfiability.

pub mod config;
pub mod puzzle;
pub mod runner;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use puzzle::{Cell, Grid};
pub use runner::{PuzzleProblem, SolverRun};

use anyhow::Result;

/// Main entry point: solve the configured puzzle with every configured
/// solver backend
pub fn solve_puzzle(settings: Settings) -> Result<Vec<SolverRun>> {
    let problem = PuzzleProblem::new(settings)?;
    Ok(problem.solve_all())
}
