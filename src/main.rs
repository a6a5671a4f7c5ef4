//! Main CLI application for the hazard puzzle solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hazard_hunter::{
    config::{CliOverrides, Settings, SolverBackend},
    puzzle::io::{append_solution_section, output_path_for},
    puzzle::load_grid_from_file,
    runner::{run_batch, PuzzleProblem},
    utils::{ColorOutput, RunFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "hazard_hunter")]
#[command(about = "Hazard grid puzzle SAT solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single puzzle file
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Attempt budget for the from-scratch solvers (overrides config)
        #[arg(short, long)]
        budget: Option<u64>,

        /// Solver backends to run: exhaustive, backtracking, oracle
        #[arg(short, long, value_delimiter = ',')]
        solvers: Option<Vec<String>>,

        /// Show the solved grid for every backend
        #[arg(long)]
        show_grids: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run all solvers over a directory of testcases
    Batch {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Testcases directory (overrides config)
        #[arg(short, long)]
        testcases: Option<PathBuf>,

        /// Solve testcases on the rayon thread pool
        #[arg(long)]
        parallel: bool,

        /// Attempt budget for the from-scratch solvers (overrides config)
        #[arg(short, long)]
        budget: Option<u64>,
    },

    /// Check a solved grid file against its hints
    Check {
        /// Solved grid file
        #[arg(short, long)]
        grid: PathBuf,
    },

    /// Create example configuration and testcase files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            budget,
            solvers,
            show_grids,
            verbose,
        } => solve_command(config, puzzle, budget, solvers, show_grids, verbose),
        Commands::Batch {
            config,
            testcases,
            parallel,
            budget,
        } => batch_command(config, testcases, parallel, budget),
        Commands::Check { grid } => check_command(grid),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn parse_backends(names: &[String]) -> Result<Vec<SolverBackend>> {
    names
        .iter()
        .map(|name| match name.to_lowercase().as_str() {
            "exhaustive" | "brute-force" => Ok(SolverBackend::Exhaustive),
            "backtracking" | "dpll" => Ok(SolverBackend::Backtracking),
            "oracle" | "cadical" => Ok(SolverBackend::Oracle),
            other => anyhow::bail!(
                "Unknown solver '{}' (expected exhaustive, backtracking or oracle)",
                other
            ),
        })
        .collect()
}

fn solve_command(
    config_path: PathBuf,
    puzzle: Option<PathBuf>,
    budget: Option<u64>,
    solvers: Option<Vec<String>>,
    show_grids: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let backends = solvers.as_deref().map(parse_backends).transpose()?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file: puzzle,
        attempt_budget: budget,
        backends,
        ..Default::default()
    });
    settings.validate().context("Configuration validation failed")?;

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Solving {}",
            settings.input.puzzle_file.display()
        ))
    );

    let start = Instant::now();
    let problem = PuzzleProblem::new(settings.clone()).context("Failed to load puzzle")?;

    if verbose {
        println!(
            "Grid size: {}x{}",
            problem.grid().rows,
            problem.grid().cols
        );
        println!("{}", problem.encoding().statistics());
    }

    let runs = problem.solve_all();
    let total_time = start.elapsed();

    println!("\n{}", RunFormatter::format_summary(&runs));

    if show_grids {
        for run in &runs {
            println!("{}", RunFormatter::format_run_with_solution(run));
        }
    }

    // Persist each solver's section next to the input, batch-style
    let output = output_path_for(&settings.input.puzzle_file);
    for (idx, run) in runs.iter().enumerate() {
        append_solution_section(&output, run.solver_name, run.solution.as_ref(), idx == 0)?;
    }
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Results written to {} ({:.3}s total)",
            output.display(),
            total_time.as_secs_f64()
        ))
    );

    Ok(())
}

fn batch_command(
    config_path: PathBuf,
    testcases: Option<PathBuf>,
    parallel: bool,
    budget: Option<u64>,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        testcases_directory: testcases,
        attempt_budget: budget,
        parallel: parallel.then_some(true),
        ..Default::default()
    });
    settings.validate().context("Configuration validation failed")?;

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Running testcases under {}",
            settings.input.testcases_directory.display()
        ))
    );

    let report = run_batch(&settings).context("Batch run failed")?;

    if report.is_empty() {
        return Ok(());
    }

    println!("\n{}", report.format_table());
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Completed {} testcase(s); times written to {}",
            report.rows.len(),
            settings
                .input
                .testcases_directory
                .join(&settings.output.times_file)
                .display()
        ))
    );

    Ok(())
}

fn check_command(grid_path: PathBuf) -> Result<()> {
    let grid = load_grid_from_file(&grid_path)
        .with_context(|| format!("Failed to load grid from {}", grid_path.display()))?;

    if grid.unknown_count() > 0 {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Grid still has {} unknown cell(s); check applies to solved grids",
                grid.unknown_count()
            ))
        );
    }

    if grid.is_fully_consistent() {
        println!("{}", ColorOutput::success("Grid is fully consistent"));
    } else {
        println!(
            "{}",
            ColorOutput::error("Grid is inconsistent: some hint does not match its hazards")
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let example_dir = directory.join("testcases/example");

    for dir in [&config_dir, &example_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.input.puzzle_file = directory.join("testcases/example/input_1.txt");
        settings.input.testcases_directory = directory.join("testcases");
        settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let example_path = example_dir.join("input_1.txt");
    if !example_path.exists() || force {
        std::fs::write(&example_path, "1, _, _\n_, 2, _\n_, _, 1\n")
            .with_context(|| format!("Failed to write {}", example_path.display()))?;
        println!("Created: {}", example_path.display());
    }

    println!("{}", ColorOutput::success("Setup complete"));
    println!("\nNext steps:");
    println!("1. Add puzzle files under {}", directory.join("testcases").display());
    println!("2. Run: cargo run -- batch --config {}", config_path.display());

    Ok(())
}
