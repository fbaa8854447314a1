//! Per-run result aggregation and console rendering.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::defs::PatchingResult;

/// Aggregated outcome of one patching run.
///
/// Any non-total success is treated as an overall failure by callers
/// deciding an exit status.
#[derive(Debug, Clone, Default)]
pub struct PatchSummary {
    results: Vec<PatchingResult>,
}

impl PatchSummary {
    pub fn new(results: Vec<PatchingResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[PatchingResult] {
        &self.results
    }

    pub fn successes(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.successes() == self.total()
    }

    /// Per-patch report with colored outcomes and the run trailer.
    pub fn render_console(&self) -> String {
        let mut output = String::new();

        for result in &self.results {
            let status = if result.success {
                "Success".green().to_string()
            } else {
                "Failure".red().to_string()
            };
            let _ = writeln!(output, "{}: {}", result.description, status);
        }

        let _ = write!(
            output,
            "\n{} out of {} applied.",
            self.successes(),
            self.total()
        );

        output
    }
}
