//! Batch conversion for iconsheet
//!
//! Drives the per-item stages over a whole catalog or directory and
//! collects the outcome of every item.
//!
//! # Overview
//!
//! - **Discovery**: find emitted icon sources and vector inputs with glob patterns
//! - **Pipeline**: extract, emit and preview every catalog entry
//! - **Preview**: re-encode emitted `.c` files as `.bmp`
//! - **Results**: per-item status and the success/failure tally
//!
//! # Example
//!
//! ```ignore
//! use iconsheet::build::{BuildContext, ConsoleProgress, IconPipeline};
//! use iconsheet::config::load_config;
//!
//! let config = load_config(None)?;
//! let context = BuildContext::new(config, project_root);
//! let progress = ConsoleProgress::new();
//!
//! let result = IconPipeline::new(context, &progress).run()?;
//! println!("{}", result.summary(&format!("Extracted {} icons", result.tally())));
//! ```

pub mod context;
pub mod discovery;
pub mod pipeline;
pub mod preview;
pub mod progress;
pub mod result;

pub use context::*;
pub use discovery::*;
pub use pipeline::*;
pub use preview::*;
pub use progress::*;
pub use result::*;
