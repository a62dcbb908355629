use anyhow::Context;
use clap::Parser;
use context_export::{Config, DEFAULT_OUTPUT_FILE};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "context-export",
    version,
    author,
    about = "Flatten a project into one text file for knowledge-base upload",
    long_about = "Walks a project directory, writes an indented listing of every file, \
    then appends the full text of each .html, .css, .js and .md file.\n\n\
    .git, node_modules and __pycache__ directories are skipped. The result is written \
    to SFT_Console_Full_Context.txt inside the project directory.\n\n\
    USAGE EXAMPLES:\n  \
      # Export the current directory\n  \
      context-export\n\n  \
      # Export another project\n  \
      context-export --dir ./my-site"
)]
struct Cli {
    /// Root directory to export
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    dir: PathBuf,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let mut builder = Config::builder().root_dir(cli.dir);

    // Never concatenate the exporter itself
    if let Some(name) = own_program_name() {
        builder = builder.self_exclude(name);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = context_export::run(config).context("Export failed")?;

    stats.print_summary();
    println!(
        "✅ Done! '{}' has been created.",
        stats
            .output_path
            .file_name()
            .map_or(DEFAULT_OUTPUT_FILE.into(), |n| n.to_string_lossy())
    );
    println!("Upload this file to your knowledge base.");

    Ok(())
}

fn own_program_name() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("context_export=info"),
        1 => EnvFilter::new("context_export=debug"),
        _ => EnvFilter::new("context_export=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
