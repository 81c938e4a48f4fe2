//! Progress reporting for conversion batches.
//!
//! All diagnostic output of a batch goes through a [`ProgressReporter`].
//! [`ConsoleProgress`] writes human-readable lines to stderr,
//! [`JsonProgress`] writes one JSON object per line, and [`NullProgress`]
//! discards everything.
//!
//! # Example
//!
//! ```
//! use iconsheet::build::progress::{ConsoleProgress, ProgressEvent, ProgressReporter};
//! use iconsheet::build::ItemStatus;
//!
//! let reporter = ConsoleProgress::with_output(Vec::new());
//! reporter.report(ProgressEvent::BatchStarted { label: "extract".to_string(), total: 1 });
//! reporter.report(ProgressEvent::ItemCompleted {
//!     name: "sunny".to_string(),
//!     status: ItemStatus::Success,
//!     duration_ms: 3,
//! });
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::json;

use super::result::{BatchResult, ItemStatus};

/// Events that can be reported during a batch.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Batch started
    BatchStarted {
        /// What the batch does ("extract", "preview", "rasterize")
        label: String,
        /// Number of items
        total: usize,
    },
    /// An item started
    ItemStarted { name: String },
    /// An item finished
    ItemCompleted { name: String, status: ItemStatus, duration_ms: u64 },
    /// Batch finished
    BatchCompleted { succeeded: usize, skipped: usize, failed: usize, duration_ms: u64 },
    /// A warning was generated
    Warning {
        /// Item that generated the warning (if applicable)
        item: Option<String>,
        message: String,
    },
    /// An error occurred outside any single item
    Error { item: Option<String>, message: String },
}

impl ProgressEvent {
    /// Completion event for a finished batch.
    pub fn batch_completed(result: &BatchResult) -> Self {
        ProgressEvent::BatchCompleted {
            succeeded: result.success_count(),
            skipped: result.skipped_count(),
            failed: result.failed_count(),
            duration_ms: result.total_duration.as_millis() as u64,
        }
    }
}

/// Trait for progress reporters.
pub trait ProgressReporter {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    use_colors: bool,
    verbose: bool,
    current: AtomicUsize,
    total: AtomicUsize,
    /// Output writer (stderr unless replaced for testing)
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("verbose", &self.verbose)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Reporter writing to stderr, colored when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(output)),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.color(text, "\x1b[32m")
    }

    fn yellow(&self, text: &str) -> String {
        self.color(text, "\x1b[33m")
    }

    fn red(&self, text: &str) -> String {
        self.color(text, "\x1b[31m")
    }

    fn cyan(&self, text: &str) -> String {
        self.color(text, "\x1b[36m")
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::BatchStarted { label, total } => {
                self.total.store(total, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} {} item{}...",
                    self.cyan(&format!("[{}]", label)),
                    total,
                    if total == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::ItemStarted { name } => {
                if self.verbose {
                    let current = self.current.load(Ordering::SeqCst) + 1;
                    let total = self.total.load(Ordering::SeqCst);
                    self.writeln(&format!("  [{}/{}] {}...", current, total, name));
                }
            }
            ProgressEvent::ItemCompleted { name, status, duration_ms } => {
                let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                let total = self.total.load(Ordering::SeqCst);

                let status_str = match &status {
                    ItemStatus::Success => self.green("ok"),
                    ItemStatus::Skipped => self.yellow("planned"),
                    ItemStatus::Failed(_) => self.red("FAILED"),
                };

                self.writeln(&format!(
                    "  [{}/{}] {} {} ({})",
                    current,
                    total,
                    status_str,
                    name,
                    format_duration(duration_ms)
                ));

                if let ItemStatus::Failed(err) = status {
                    self.writeln(&format!("        {}", self.red(&err)));
                }
            }
            ProgressEvent::BatchCompleted { succeeded, skipped, failed, duration_ms } => {
                let total = succeeded + skipped + failed;
                let line = format!(
                    "Complete: {}/{} succeeded, {} failed in {}",
                    succeeded,
                    total,
                    failed,
                    format_duration(duration_ms)
                );
                if failed == 0 {
                    self.writeln(&self.green(&line));
                } else {
                    self.writeln(&self.red(&line));
                }
            }
            ProgressEvent::Warning { item, message } => {
                let prefix = item.map(|i| format!("{}: ", i)).unwrap_or_default();
                self.writeln(&format!("{} {}{}", self.yellow("[warn]"), prefix, message));
            }
            ProgressEvent::Error { item, message } => {
                let prefix = item.map(|i| format!("{}: ", i)).unwrap_or_default();
                self.writeln(&format!("{} {}{}", self.red("[error]"), prefix, message));
            }
        }
    }
}

/// JSON progress reporter for machine-readable output.
pub struct JsonProgress {
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { output: Mutex::new(Box::new(output)) }
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", value);
        }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let value = match event {
            ProgressEvent::BatchStarted { label, total } => {
                json!({ "event": "batch_started", "label": label, "total": total })
            }
            ProgressEvent::ItemStarted { name } => json!({ "event": "item_started", "name": name }),
            ProgressEvent::ItemCompleted { name, status, duration_ms } => {
                let mut value = json!({
                    "event": "item_completed",
                    "name": name,
                    "status": match &status {
                        ItemStatus::Success => "success",
                        ItemStatus::Skipped => "skipped",
                        ItemStatus::Failed(_) => "failed",
                    },
                    "duration_ms": duration_ms,
                });
                if let ItemStatus::Failed(err) = status {
                    value["error"] = json!(err);
                }
                value
            }
            ProgressEvent::BatchCompleted { succeeded, skipped, failed, duration_ms } => json!({
                "event": "batch_completed",
                "success": failed == 0,
                "succeeded": succeeded,
                "skipped": skipped,
                "failed": failed,
                "duration_ms": duration_ms,
            }),
            ProgressEvent::Warning { item, message } => {
                json!({ "event": "warning", "item": item, "message": message })
            }
            ProgressEvent::Error { item, message } => {
                json!({ "event": "error", "item": item, "message": message })
            }
        };
        self.write_json(value);
    }
}

/// Format a duration in milliseconds to a human-readable string.
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5), "5ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(125_000), "2m 5s");
    }

    #[test]
    fn test_console_reports_failure_with_cause() {
        let buf = SharedBuf::default();
        let reporter = ConsoleProgress::with_output(buf.clone());

        reporter.report(ProgressEvent::BatchStarted { label: "extract".to_string(), total: 2 });
        reporter.report(ProgressEvent::ItemCompleted {
            name: "sunny".to_string(),
            status: ItemStatus::Success,
            duration_ms: 4,
        });
        reporter.report(ProgressEvent::ItemCompleted {
            name: "fog".to_string(),
            status: ItemStatus::Failed("permission denied".to_string()),
            duration_ms: 1,
        });
        reporter.report(ProgressEvent::BatchCompleted {
            succeeded: 1,
            skipped: 0,
            failed: 1,
            duration_ms: 5,
        });

        let text = buf.text();
        assert!(text.contains("[extract] 2 items..."));
        assert!(text.contains("[1/2] ok sunny (4ms)"));
        assert!(text.contains("[2/2] FAILED fog (1ms)"));
        assert!(text.contains("permission denied"));
        assert!(text.contains("Complete: 1/2 succeeded, 1 failed"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_console_item_started_only_when_verbose() {
        let quiet_buf = SharedBuf::default();
        let quiet = ConsoleProgress::with_output(quiet_buf.clone());
        quiet.report(ProgressEvent::ItemStarted { name: "sunny".to_string() });
        assert!(quiet_buf.text().is_empty());

        let loud_buf = SharedBuf::default();
        let loud = ConsoleProgress::with_output(loud_buf.clone()).with_verbose(true);
        loud.report(ProgressEvent::ItemStarted { name: "sunny".to_string() });
        assert!(loud_buf.text().contains("sunny..."));
    }

    #[test]
    fn test_error_event_lines() {
        let buf = SharedBuf::default();
        let console = ConsoleProgress::with_output(buf.clone());
        console.report(ProgressEvent::Error {
            item: None,
            message: "Cannot read sprite sheet: missing".to_string(),
        });
        assert_eq!(buf.text(), "[error] Cannot read sprite sheet: missing\n");

        let json_buf = SharedBuf::default();
        let json = JsonProgress::with_output(json_buf.clone());
        json.report(ProgressEvent::Error {
            item: Some("fog".to_string()),
            message: "x".to_string(),
        });
        let value: serde_json::Value = serde_json::from_str(json_buf.text().trim()).unwrap();
        assert_eq!(value["event"], "error");
        assert_eq!(value["item"], "fog");
    }

    #[test]
    fn test_console_colors() {
        let buf = SharedBuf::default();
        let reporter = ConsoleProgress::with_output(buf.clone()).with_colors(true);
        reporter.report(ProgressEvent::Warning { item: None, message: "careful".to_string() });
        assert!(buf.text().contains("\x1b[33m[warn]\x1b[0m careful"));
    }

    #[test]
    fn test_json_lines() {
        let buf = SharedBuf::default();
        let reporter = JsonProgress::with_output(buf.clone());

        reporter.report(ProgressEvent::ItemCompleted {
            name: "fog \"alias\"".to_string(),
            status: ItemStatus::Failed("bad".to_string()),
            duration_ms: 2,
        });
        reporter.report(ProgressEvent::BatchCompleted {
            succeeded: 3,
            skipped: 0,
            failed: 0,
            duration_ms: 9,
        });

        let text = buf.text();
        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "item_completed");
        assert_eq!(lines[0]["name"], "fog \"alias\"");
        assert_eq!(lines[0]["status"], "failed");
        assert_eq!(lines[0]["error"], "bad");
        assert_eq!(lines[1]["success"], true);
        assert_eq!(lines[1]["succeeded"], 3);
    }
}
