//! SVG rasterization through an external tool.
//!
//! The conversion itself happens in a separate process. This module only
//! builds the command line, enforces a timeout and checks that the output
//! file exists and is larger than a minimum size. Batch code talks to the
//! [`Rasterizer`] trait so it can run against a fake in tests.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::build::discovery::{file_label, find_svg_files};
use crate::build::{BatchResult, BuildError, ItemResult, ProgressEvent, ProgressReporter};
use crate::error::{IconError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Longest stderr excerpt kept in a failure message.
const STDERR_EXCERPT: usize = 100;

/// One file to rasterize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl RasterRequest {
    /// Square export of `input` into `output_dir/<stem>.png`.
    pub fn square(input: &Path, output_dir: &Path, size: u32) -> Self {
        let mut file_name = input.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
        file_name.push(".png");
        let output = output_dir.join(file_name);
        Self { input: input.to_path_buf(), output, width: size, height: size }
    }
}

/// Something that turns a vector file into a PNG.
pub trait Rasterizer {
    /// Tool name used in error messages.
    fn name(&self) -> &str;

    /// Produce `request.output`. Output validation is left to the caller.
    fn rasterize(&self, request: &RasterRequest) -> Result<()>;
}

/// Runs Inkscape's command-line exporter.
#[derive(Debug, Clone)]
pub struct InkscapeRasterizer {
    program: PathBuf,
    name: String,
    timeout: Duration,
}

impl InkscapeRasterizer {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        let program = program.into();
        let name = program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());
        Self { program, name, timeout }
    }

    /// Find `tool` on `PATH` (or accept it as a path to an executable).
    pub fn locate(tool: &str, timeout: Duration) -> Result<Self> {
        let program = which::which(tool)
            .map_err(|e| IconError::tool(tool, format!("executable not found ({})", e)))?;
        Ok(Self::new(program, timeout))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for one export.
    pub fn command_args(request: &RasterRequest) -> Vec<OsString> {
        let mut filename = OsString::from("--export-filename=");
        filename.push(request.output.as_os_str());
        vec![
            request.input.clone().into_os_string(),
            OsString::from("--export-type=png"),
            filename,
            OsString::from(format!("--export-width={}", request.width)),
            OsString::from(format!("--export-height={}", request.height)),
            OsString::from("--export-background-opacity=0"),
        ]
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<ExitStatus> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(IconError::tool(
                            &self.name,
                            format!("timed out after {:.1}s", self.timeout.as_secs_f64()),
                        ));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(IconError::tool(&self.name, format!("wait failed: {}", e)));
                }
            }
        }
    }
}

impl Rasterizer for InkscapeRasterizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn rasterize(&self, request: &RasterRequest) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(Self::command_args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| IconError::tool(&self.name, format!("failed to start: {}", e)))?;

        // Drain stderr on a separate thread so a chatty tool cannot block on a full pipe.
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut text = String::new();
                let _ = stderr.read_to_string(&mut text);
                text
            })
        });

        let status = self.wait_with_timeout(&mut child)?;
        let stderr = stderr_reader.and_then(|h| h.join().ok()).unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            let code = status.code().map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string());
            let excerpt: String = stderr.trim().chars().take(STDERR_EXCERPT).collect();
            let reason = if excerpt.is_empty() {
                format!("exited with status {}", code)
            } else {
                format!("exited with status {}: {}", code, excerpt)
            };
            Err(IconError::tool(&self.name, reason))
        }
    }
}

/// Accept an output file only if it exists and is larger than `min_bytes`.
pub fn check_output(path: &Path, min_bytes: u64) -> Result<u64> {
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(_) => {
            return Err(IconError::tool("output", format!("{} was not created", path.display())))
        }
    };
    if size <= min_bytes {
        return Err(IconError::tool(
            "output",
            format!("{} is too small ({} bytes, need more than {})", path.display(), size, min_bytes),
        ));
    }
    Ok(size)
}

/// Rasterize one request and validate its output.
pub fn rasterize_one(
    rasterizer: &dyn Rasterizer,
    request: &RasterRequest,
    min_output_bytes: u64,
) -> Result<u64> {
    if let Some(parent) = request.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))?;
        }
    }
    rasterizer.rasterize(request)?;
    check_output(&request.output, min_output_bytes)
}

/// Rasterize every `*.svg` in `input_dir` (sorted) to `output_dir` at
/// `size`x`size`. One file failing does not stop the others.
pub fn rasterize_all(
    rasterizer: &dyn Rasterizer,
    input_dir: &Path,
    output_dir: &Path,
    size: u32,
    min_output_bytes: u64,
    reporter: &dyn ProgressReporter,
) -> std::result::Result<BatchResult, BuildError> {
    let start = Instant::now();
    let inputs = find_svg_files(input_dir)?;
    let mut result = BatchResult::new();

    reporter.report(ProgressEvent::BatchStarted {
        label: "rasterize".to_string(),
        total: inputs.len(),
    });

    for input in &inputs {
        let name = file_label(input);
        let request = RasterRequest::square(input, output_dir, size);
        let item_start = Instant::now();
        reporter.report(ProgressEvent::ItemStarted { name: name.clone() });

        let item = match rasterize_one(rasterizer, &request, min_output_bytes) {
            Ok(_) => ItemResult::success(name, vec![request.output.clone()], item_start.elapsed()),
            Err(e) => ItemResult::failed(name, e.to_string(), item_start.elapsed()),
        };

        reporter.report(ProgressEvent::ItemCompleted {
            name: item.name.clone(),
            status: item.status.clone(),
            duration_ms: item.duration.as_millis() as u64,
        });
        result.add_result(item);
    }

    let result = result.with_duration(start.elapsed());
    reporter.report(ProgressEvent::batch_completed(&result));
    Ok(result)
}
