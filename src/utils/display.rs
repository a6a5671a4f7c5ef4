//! Console formatting utilities

use crate::runner::SolverRun;
use crate::sat::SolveOutcome;

/// Formats solver runs for console output
pub struct RunFormatter;

impl RunFormatter {
    /// One-line summary per solver run
    pub fn format_run(run: &SolverRun) -> String {
        let verdict = match &run.outcome {
            SolveOutcome::Satisfiable(_) => match run.verified {
                Some(true) => "satisfiable (verified)".to_string(),
                Some(false) => "satisfiable (FAILED verification)".to_string(),
                None => "satisfiable".to_string(),
            },
            outcome => outcome.to_string(),
        };

        format!(
            "{}: {} in {:.6}s",
            run.solver_name,
            verdict,
            run.elapsed.as_secs_f64()
        )
    }

    /// Multi-line block: summary line plus the solved grid, when present
    pub fn format_run_with_solution(run: &SolverRun) -> String {
        let mut output = Self::format_run(run);
        if let Some(grid) = &run.solution {
            output.push('\n');
            output.push_str(&grid.to_string());
        }
        output
    }

    /// Summary table over all runs of one puzzle
    pub fn format_summary(runs: &[SolverRun]) -> String {
        let mut output = String::new();
        output.push_str(&format!("{:<14} | {:<28} | {:>12}\n", "Solver", "Outcome", "Time (s)"));
        output.push_str(&format!("{:-<14}-|-{:-<28}-|-{:->12}\n", "", "", ""));
        for run in runs {
            let outcome = match (&run.outcome, run.verified) {
                (SolveOutcome::Satisfiable(_), Some(true)) => "satisfiable (verified)",
                (SolveOutcome::Satisfiable(_), Some(false)) => "satisfiable (verify failed)",
                (SolveOutcome::Satisfiable(_), None) => "satisfiable",
                (SolveOutcome::Unsatisfiable, _) => "unsatisfiable",
                (SolveOutcome::BudgetExceeded, _) => "budget exceeded",
            };
            output.push_str(&format!(
                "{:<14} | {:<28} | {:>12.6}\n",
                run.solver_name,
                outcome,
                run.elapsed.as_secs_f64()
            ));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
