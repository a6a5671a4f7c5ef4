//! Puzzle grid model and file I/O

pub mod grid;
pub mod io;

pub use grid::{Cell, Grid, GridError};
pub use io::{load_grid_from_file, parse_grid_from_string, save_grid_to_file};
