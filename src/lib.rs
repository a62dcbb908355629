//! # context-export
//!
//! Flattens a project tree into a single text file for knowledge-base upload.
//!
//! The export starts with an indented listing of every directory and file,
//! followed by the full text of each file whose name ends in a tracked suffix
//! (`.html`, `.css`, `.js`, `.md` by default). Version-control and dependency
//! directories are pruned from both.
//!
//! ## Quick Start
//!
//! ```no_run
//! use context_export::{Config, run};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .root_dir("./site")
//!     .build()?;
//!
//! let stats = run(config)?;
//! println!("{} files concatenated", stats.files_concatenated);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Scanner**: Walks the tree once, pruning excluded directories
//! 2. **File**: Reads each selected file into a typed success/failure value
//! 3. **Writer**: Streams the structure section and content blocks to one handle

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod aggregator;
mod config;
mod error;
mod file;
mod scanner;
mod writer;

pub use aggregator::{Aggregator, ExportStats};
pub use config::{
    Config, ConfigBuilder, DEFAULT_EXCLUDE_DIRS, DEFAULT_EXTENSIONS, DEFAULT_OUTPUT_FILE,
};
pub use error::{Error, Result};
pub use file::{FileContent, SourceFile};

/// Runs a complete export with the given configuration.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - Root directory doesn't exist or cannot be enumerated
/// - The output file cannot be created or written
///
/// Files that cannot be read are not errors; they are reported inline in the
/// export and counted in [`ExportStats::files_failed`].
pub fn run(config: Config) -> Result<ExportStats> {
    Aggregator::new(config)?.run()
}
