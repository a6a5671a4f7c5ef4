//! Configuration settings for the hazard puzzle solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Single puzzle file for the `solve` subcommand
    pub puzzle_file: PathBuf,
    /// Directory of testcase subfolders for the `batch` subcommand
    pub testcases_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Backends to run per puzzle, in order
    pub backends: Vec<SolverBackend>,
    /// Attempt/step budget for the from-scratch solvers
    pub attempt_budget: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Brute-force enumeration over all truth assignments
    Exhaustive,
    /// DPLL backtracking with unit propagation
    Backtracking,
    /// External CaDiCaL reference solver
    Oracle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// File name of the timing table, written into the testcases directory
    pub times_file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Run batch testcases on the rayon thread pool. Safe because every
    /// solver run owns private copies of the grid and formula.
    pub parallel: bool,
    /// Re-check decoded grids against the hints after solving
    pub verify_solutions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                puzzle_file: PathBuf::from("testcases/example/input_1.txt"),
                testcases_directory: PathBuf::from("testcases"),
            },
            solver: SolverConfig {
                backends: vec![
                    SolverBackend::Exhaustive,
                    SolverBackend::Backtracking,
                    SolverBackend::Oracle,
                ],
                attempt_budget: 2_000_000,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                times_file: "result_times.txt".to_string(),
            },
            runner: RunnerConfig {
                parallel: false,
                verify_solutions: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.backends.is_empty() {
            anyhow::bail!("At least one solver backend must be configured");
        }

        if self.solver.attempt_budget == 0 {
            anyhow::bail!("Attempt budget must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref testcases) = cli_overrides.testcases_directory {
            self.input.testcases_directory = testcases.clone();
        }
        if let Some(budget) = cli_overrides.attempt_budget {
            self.solver.attempt_budget = budget;
        }
        if let Some(ref backends) = cli_overrides.backends {
            self.solver.backends = backends.clone();
        }
        if let Some(parallel) = cli_overrides.parallel {
            self.runner.parallel = parallel;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub testcases_directory: Option<PathBuf>,
    pub attempt_budget: Option<u64>,
    pub backends: Option<Vec<SolverBackend>>,
    pub parallel: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.solver.backends.len(), 3);
        assert_eq!(settings.solver.attempt_budget, 2_000_000);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let settings = Settings::default();
        settings.to_file(&path).unwrap();

        let reloaded = Settings::from_file(&path).unwrap();
        assert_eq!(reloaded.solver.backends, settings.solver.backends);
        assert_eq!(reloaded.output.times_file, settings.output.times_file);
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        let mut settings = Settings::default();
        settings.solver.backends.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.attempt_budget = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            puzzle_file: Some(PathBuf::from("other.txt")),
            attempt_budget: Some(500),
            backends: Some(vec![SolverBackend::Backtracking]),
            parallel: Some(true),
            ..Default::default()
        };

        settings.merge_with_cli(&overrides);
        assert_eq!(settings.input.puzzle_file, PathBuf::from("other.txt"));
        assert_eq!(settings.solver.attempt_budget, 500);
        assert_eq!(settings.solver.backends, vec![SolverBackend::Backtracking]);
        assert!(settings.runner.parallel);
    }
}
