//! Output formatting for the samvat CLI.

/// Per-stage outcome collector for the pipeline run.
///
/// Every stage is recorded whether it succeeded or not; the summary at the
/// end of a run shows exactly which stages degraded instead of the run
/// aborting on the first failure.
pub(crate) struct Summary {
    stages: Vec<(String, bool)>,
}

impl Summary {
    /// Creates an empty summary.
    pub(crate) const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Records a stage outcome.
    pub(crate) fn stage(&mut self, label: impl Into<String>, ok: bool) {
        self.stages.push((label.into(), ok));
    }

    /// Returns true if every recorded stage succeeded.
    pub(crate) fn all_ok(&self) -> bool {
        self.stages.iter().all(|(_, ok)| *ok)
    }

    /// Returns the labels of failed stages.
    pub(crate) fn failed(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(label, _)| label.as_str())
            .collect()
    }

    /// Prints the summary block.
    pub(crate) fn print(&self) {
        let width = self
            .stages
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);

        println!("\nSummary");
        for (label, ok) in &self.stages {
            let status = if *ok { "ok" } else { "FAILED" };
            println!("  {label:<width$}  {status}");
        }
    }
}
