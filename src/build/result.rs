//! Per-item results and the batch tally.
//!
//! Every converted item (icon, preview, rasterized file) produces one
//! [`ItemResult`]. Failures are recorded, never propagated, so a batch always
//! runs to the end.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// Converted and written
    Success,
    /// Not processed (dry run)
    Skipped,
    /// Failed with the given reason
    Failed(String),
}

impl ItemStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Success | ItemStatus::Skipped)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, ItemStatus::Failed(_))
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Success => write!(f, "success"),
            ItemStatus::Skipped => write!(f, "skipped"),
            ItemStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of processing one item.
#[derive(Debug, Clone)]
pub struct ItemResult {
    /// Item name (icon name or input file name)
    pub name: String,
    pub status: ItemStatus,
    /// Files written (or planned, for a dry run)
    pub outputs: Vec<PathBuf>,
    pub duration: Duration,
}

impl ItemResult {
    pub fn success(name: impl Into<String>, outputs: Vec<PathBuf>, duration: Duration) -> Self {
        Self { name: name.into(), status: ItemStatus::Success, outputs, duration }
    }

    /// A planned but unexecuted item.
    pub fn skipped(name: impl Into<String>, outputs: Vec<PathBuf>) -> Self {
        Self { name: name.into(), status: ItemStatus::Skipped, outputs, duration: Duration::ZERO }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: ItemStatus::Failed(error.into()),
            outputs: vec![],
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Results of a complete batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub items: Vec<ItemResult>,
    pub total_duration: Duration,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: ItemResult) {
        self.items.push(result);
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|r| matches!(r.status, ItemStatus::Success)).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.items.iter().filter(|r| matches!(r.status, ItemStatus::Skipped)).count()
    }

    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|r| r.status.is_failure()).count()
    }

    /// No item failed.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// At least one item succeeded.
    pub fn any_success(&self) -> bool {
        self.success_count() > 0
    }

    pub fn failures(&self) -> Vec<&ItemResult> {
        self.items.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// `"{succeeded}/{total}"`.
    pub fn tally(&self) -> String {
        format!("{}/{}", self.success_count(), self.total())
    }

    /// Multi-line summary: `headline`, then one line per failure.
    pub fn summary(&self, headline: &str) -> String {
        let mut lines = vec![headline.to_string()];
        if self.skipped_count() > 0 {
            lines.push(format!("  ({} planned, dry run)", self.skipped_count()));
        }
        for item in self.failures() {
            lines.push(format!("  - {}: {}", item.name, item.status));
        }
        lines.join("\n")
    }
}
