//! Configuration management for the hazard puzzle solver

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, RunnerConfig, Settings, SolverBackend,
    SolverConfig,
};
