//! File I/O for puzzle grids and solver output files

use super::{Cell, Grid, GridError};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load a grid from a text file.
/// Format: one row per line, cells separated by commas; a cell is a
/// non-negative hint count, `_` for unknown, `H` for hazard or `S` for safe.
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let mut cells = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let mut parsed_row = Vec::new();
        for (col, token) in line.split(',').map(str::trim).enumerate() {
            parsed_row.push(parse_cell(token, row, col)?);
        }
        cells.push(parsed_row);
    }

    Ok(Grid::from_cells(cells)?)
}

fn parse_cell(token: &str, row: usize, col: usize) -> Result<Cell, GridError> {
    match token {
        "_" => Ok(Cell::Unknown),
        "H" => Ok(Cell::Hazard),
        "S" => Ok(Cell::Safe),
        _ => token
            .parse::<u32>()
            .map(Cell::Hint)
            .map_err(|_| GridError::InvalidToken {
                token: token.to_string(),
                row,
                col,
            }),
    }
}

/// Save a grid to a text file, creating parent directories as needed
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid.to_string())
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Append one solver's result under a named header to an output file.
/// `overwrite` truncates the file first, so the first solver of a run starts
/// a fresh file and the rest append to it.
pub fn append_solution_section<P: AsRef<Path>>(
    path: P,
    solver_name: &str,
    solution: Option<&Grid>,
    overwrite: bool,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(!overwrite)
        .truncate(overwrite)
        .open(&path)
        .with_context(|| format!("Failed to open output file: {}", path.as_ref().display()))?;

    writeln!(file, "{}:", solver_name)?;
    match solution {
        Some(grid) => writeln!(file, "{}", grid)?,
        None => writeln!(file, "No solution\n")?,
    }

    Ok(())
}

/// Find testcase input files: subdirectories of `dir` containing an
/// `input_*.txt`, sorted by path for reproducible batch ordering
pub fn discover_testcases<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read testcases directory: {}", dir.as_ref().display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let mut case_inputs: Vec<PathBuf> = std::fs::read_dir(&path)
            .with_context(|| format!("Failed to read testcase directory: {}", path.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("input_") && n.ends_with(".txt"))
                    .unwrap_or(false)
            })
            .collect();
        case_inputs.sort();

        // One input per testcase folder; extras are ignored like the
        // original driver did
        if let Some(input) = case_inputs.into_iter().next() {
            inputs.push(input);
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Derive the output path for an input file (`input_*.txt` -> `output_*.txt`)
pub fn output_path_for(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input.txt");
    input.with_file_name(name.replacen("input_", "output_", 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid() {
        let grid = parse_grid_from_string("1, _, _\n_, 2, _\n").unwrap();
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.get(0, 0), Cell::Hint(1));
        assert_eq!(grid.get(0, 1), Cell::Unknown);
        assert_eq!(grid.get(1, 1), Cell::Hint(2));
    }

    #[test]
    fn test_parse_solved_markers() {
        let grid = parse_grid_from_string("1, H\nS, 1\n").unwrap();
        assert_eq!(grid.get(0, 1), Cell::Hazard);
        assert_eq!(grid.get(1, 0), Cell::Safe);
    }

    #[test]
    fn test_parse_invalid_token() {
        let err = parse_grid_from_string("1, X\n").unwrap_err();
        assert!(err.to_string().contains("invalid cell token 'X'"));
    }

    #[test]
    fn test_parse_ragged_grid() {
        let err = parse_grid_from_string("1, _\n_\n").unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_grid_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.txt");

        let grid = parse_grid_from_string("0, _, 1\n_, 2, _\n").unwrap();
        save_grid_to_file(&grid, &path).unwrap();

        let reloaded = load_grid_from_file(&path).unwrap();
        assert_eq!(grid, reloaded);
    }

    #[test]
    fn test_append_solution_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output_1.txt");

        let grid = parse_grid_from_string("1, H\n").unwrap();
        append_solution_section(&path, "Brute force", Some(&grid), true).unwrap();
        append_solution_section(&path, "Backtracking", None, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Brute force:\n1, H\n"));
        assert!(content.contains("Backtracking:\nNo solution"));
    }

    #[test]
    fn test_discover_testcases() {
        let dir = tempdir().unwrap();
        let case_a = dir.path().join("case_a");
        let case_b = dir.path().join("case_b");
        std::fs::create_dir_all(&case_a).unwrap();
        std::fs::create_dir_all(&case_b).unwrap();
        std::fs::write(case_a.join("input_1.txt"), "1, _\n").unwrap();
        std::fs::write(case_b.join("input_2.txt"), "_, 1\n").unwrap();
        std::fs::write(case_b.join("notes.txt"), "not an input").unwrap();

        let inputs = discover_testcases(dir.path()).unwrap();
        assert_eq!(inputs.len(), 2);
        assert!(inputs[0].ends_with("case_a/input_1.txt"));
        assert!(inputs[1].ends_with("case_b/input_2.txt"));

        assert_eq!(
            output_path_for(&inputs[0]).file_name().unwrap(),
            "output_1.txt"
        );
    }
}
