//! Puzzle orchestration: single instances, batches and timing reports

pub mod batch;
pub mod problem;
pub mod report;

pub use batch::run_batch;
pub use problem::{PuzzleProblem, SolverRun};
pub use report::{TimingReport, TimingRow};
