//! Per-testcase timing aggregation and report files

use super::problem::SolverRun;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Timing and outcome of one solver over one testcase
#[derive(Debug, Clone, Serialize)]
pub struct SolverTiming {
    pub solver: String,
    pub outcome: String,
    pub seconds: f64,
}

/// One testcase row of the timing report
#[derive(Debug, Clone, Serialize)]
pub struct TimingRow {
    pub testcase: String,
    pub rows: usize,
    pub cols: usize,
    pub timings: Vec<SolverTiming>,
}

impl TimingRow {
    pub fn from_runs(testcase: String, rows: usize, cols: usize, runs: &[SolverRun]) -> Self {
        let timings = runs
            .iter()
            .map(|run| SolverTiming {
                solver: run.solver_name.to_string(),
                outcome: run.outcome.to_string(),
                seconds: run.elapsed.as_secs_f64(),
            })
            .collect();

        Self {
            testcase,
            rows,
            cols,
            timings,
        }
    }
}

/// Aggregated timings across a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimingReport {
    pub rows: Vec<TimingRow>,
}

impl TimingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: TimingRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Solver column headers, taken from the first row
    fn solver_names(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.timings.iter().map(|t| t.solver.as_str()).collect())
            .unwrap_or_default()
    }

    /// Format the aligned text table: testcase index, grid size, one
    /// elapsed-seconds column per solver
    pub fn format_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:>10} | {:>10}", "Testcase", "Size"));
        for name in self.solver_names() {
            output.push_str(&format!(" | {:>20}", format!("{} (s)", name)));
        }
        output.push('\n');

        for (idx, row) in self.rows.iter().enumerate() {
            let size = format!("{}x{}", row.rows, row.cols);
            output.push_str(&format!("{:>10} | {:>10}", idx, size));
            for timing in &row.timings {
                output.push_str(&format!(" | {:>20.6}", timing.seconds));
            }
            output.push('\n');
        }

        output
    }

    /// Write the text table to a file
    pub fn write_table<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        std::fs::write(&path, self.format_table())
            .with_context(|| format!("Failed to write times file: {}", path.as_ref().display()))
    }

    /// Write the full report as pretty JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))
    }
}
