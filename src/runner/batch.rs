//! Batch driver: run every configured solver over a directory of testcases

use super::problem::PuzzleProblem;
use super::report::{TimingReport, TimingRow};
use crate::config::{OutputFormat, Settings};
use crate::puzzle::io::{append_solution_section, discover_testcases, output_path_for};
use crate::puzzle::load_grid_from_file;
use crate::utils::ColorOutput;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Run the whole testcases directory and write per-case output files plus
/// the aggregated timing report. A failing testcase is reported and skipped;
/// it never aborts the batch.
pub fn run_batch(settings: &Settings) -> Result<TimingReport> {
    let inputs = discover_testcases(&settings.input.testcases_directory)?;

    if inputs.is_empty() {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "No testcases found under {}",
                settings.input.testcases_directory.display()
            ))
        );
        return Ok(TimingReport::new());
    }

    // Every solver run owns private copies of grid and formula, so
    // testcases are independent and safe to spread across the pool
    let rows: Vec<Option<TimingRow>> = if settings.runner.parallel {
        inputs
            .par_iter()
            .map(|input| run_testcase_logged(settings, input))
            .collect()
    } else {
        inputs
            .iter()
            .map(|input| run_testcase_logged(settings, input))
            .collect()
    };

    let mut report = TimingReport::new();
    for row in rows.into_iter().flatten() {
        report.add_row(row);
    }

    write_report(settings, &report)?;
    Ok(report)
}

fn run_testcase_logged(settings: &Settings, input: &Path) -> Option<TimingRow> {
    match run_testcase(settings, input) {
        Ok(row) => Some(row),
        Err(e) => {
            eprintln!(
                "{}",
                ColorOutput::error(&format!("Skipping {}: {:#}", input.display(), e))
            );
            None
        }
    }
}

/// Solve a single testcase input and append each solver's section to the
/// matching output file
fn run_testcase(settings: &Settings, input: &Path) -> Result<TimingRow> {
    let grid = load_grid_from_file(input)?;

    println!("{}:", input.display());
    println!("Grid size: {}x{}", grid.rows, grid.cols);

    let problem = PuzzleProblem::with_grid(settings.clone(), grid);
    let runs = problem.solve_all();

    let output = output_path_for(input);
    for (idx, run) in runs.iter().enumerate() {
        append_solution_section(&output, run.solver_name, run.solution.as_ref(), idx == 0)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        println!(
            "{} completed in {:.6} seconds ({}).",
            run.solver_name,
            run.elapsed.as_secs_f64(),
            run.outcome
        );
    }

    Ok(TimingRow::from_runs(
        testcase_name(input),
        problem.grid().rows,
        problem.grid().cols,
        &runs,
    ))
}

fn testcase_name(input: &Path) -> String {
    input
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("testcase")
        .to_string()
}

fn write_report(settings: &Settings, report: &TimingReport) -> Result<()> {
    if report.is_empty() {
        return Ok(());
    }

    let table_path: PathBuf = settings
        .input
        .testcases_directory
        .join(&settings.output.times_file);
    report.write_table(&table_path)?;

    if settings.output.format == OutputFormat::Json {
        let json_path = table_path.with_extension("json");
        report.write_json(&json_path)?;
    }

    Ok(())
}
