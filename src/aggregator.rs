use crate::{
    config::Config,
    error::Result,
    file::SourceFile,
    scanner::{Scanner, Snapshot},
    writer::Writer,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during an export run.
#[derive(Debug, Clone)]
pub struct ExportStats {
    /// Directories in the structure listing, root included
    pub directories: usize,

    /// Files in the structure listing
    pub files_listed: usize,

    /// Content blocks written with file text
    pub files_concatenated: usize,

    /// Content blocks written with an inline read error
    pub files_failed: usize,

    /// Subdirectories skipped because they could not be enumerated
    pub skipped_dirs: usize,

    /// Size of the export in bytes
    pub bytes_written: u64,

    /// Total execution time
    pub duration: Duration,

    /// Where the export was written
    pub output_path: PathBuf,
}

impl ExportStats {
    /// Number of content blocks, successful or not.
    #[must_use]
    pub const fn total_blocks(&self) -> usize {
        self.files_concatenated + self.files_failed
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║                 Export Summary                        ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Directories:          {:>8}                        ║",
            self.directories
        );
        println!(
            "║ Files listed:         {:>8}                        ║",
            self.files_listed
        );
        println!(
            "║ Files concatenated:   {:>8}                        ║",
            self.files_concatenated
        );
        println!(
            "║ Read errors:          {:>8}                        ║",
            self.files_failed
        );
        println!(
            "║ Bytes written:        {:>8}                        ║",
            self.bytes_written
        );
        println!(
            "║ Duration:             {:>8.2}s                       ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}

/// Walks a project tree and writes its structure and text content into one file.
pub struct Aggregator {
    config: Config,
}

impl Aggregator {
    /// Creates a new aggregator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Executes the export and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Open**: Creates or truncates the output file
    /// 2. **Walk**: Records the tree listing and selects content files
    /// 3. **Write**: Emits the structure section, then one block per selected file
    ///
    /// The output file is created before the walk, so it shows up in the
    /// listing. A file that cannot be read produces an inline error block and
    /// the run continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be created or written, or if the
    /// root directory cannot be enumerated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use context_export::{Aggregator, Config};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().root_dir(".").build()?;
    ///
    /// let stats = Aggregator::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn run(self) -> Result<ExportStats> {
        let start_time = Instant::now();

        info!("Starting export to {}", self.config.output_path.display());

        let mut writer = Writer::create(&self.config.output_path)?;

        let snapshot = Scanner::new(&self.config).scan()?;
        info!(
            "✓ Found {} files in {} directories, {} to concatenate",
            snapshot.file_count(),
            snapshot.directory_count(),
            snapshot.sources.len()
        );

        writer.write_structure(&snapshot.tree)?;

        let (files_concatenated, files_failed) = Self::write_contents(&mut writer, &snapshot)?;
        let bytes_written = writer.finish()?;

        if files_failed > 0 {
            warn!("{} file(s) could not be read; see inline errors", files_failed);
        }

        let stats = ExportStats {
            directories: snapshot.directory_count(),
            files_listed: snapshot.file_count(),
            files_concatenated,
            files_failed,
            skipped_dirs: snapshot.skipped_dirs,
            bytes_written,
            duration: start_time.elapsed(),
            output_path: self.config.output_path,
        };

        info!(
            "✓ Export completed in {:.2}s ({} bytes)",
            stats.duration.as_secs_f64(),
            stats.bytes_written
        );

        Ok(stats)
    }

    fn write_contents<W: std::io::Write>(
        writer: &mut Writer<W>,
        snapshot: &Snapshot,
    ) -> Result<(usize, usize)> {
        let mut concatenated = 0;
        let mut failed = 0;

        for candidate in &snapshot.sources {
            let source = SourceFile::read(candidate.path.clone(), candidate.label.clone());

            match source.error() {
                None => {
                    debug!("Concatenated {}", source.label);
                    concatenated += 1;
                }
                Some(e) => {
                    warn!("Failed to read {}: {}", source.label, e);
                    failed += 1;
                }
            }

            writer.write_block(&source)?;
        }

        Ok((concatenated, failed))
    }
}
