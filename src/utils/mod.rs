//! Formatting and console helpers

pub mod display;

pub use display::{Color, ColorOutput, RunFormatter};
