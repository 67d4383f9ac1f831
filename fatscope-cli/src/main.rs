// fatscope-cli/src/main.rs

mod utils;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fatscope::fat16::{Severity, inspect};

use crate::utils::*;

#[derive(Parser)]
#[command(name = "fatscope", version, about = "FAT16 volume image inspector", long_about = None)]
struct Cli {
    /// FAT16 volume image
    image: PathBuf,

    /// Print progress notes on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Only print the report
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    set_log_level(match (cli.quiet, cli.verbose) {
        (true, _) => LogLevel::Quiet,
        (_, true) => LogLevel::Verbose,
        _ => LogLevel::Normal,
    });

    log_verbose!("Reading image: {}", cli.image.display());
    let image = std::fs::read(&cli.image)
        .with_context(|| format!("Cannot read image {}", cli.image.display()))?;
    log_verbose!("Loaded {}", ByteSize(image.len() as u64));

    let insp = inspect(&image).context("Not a usable FAT16 volume")?;
    log_verbose!(
        "{} FAT entries, {} chains, {} directories",
        Thousands(insp.fat.entry_count as u64),
        insp.fat.chains.len(),
        insp.tree.len()
    );

    let mut out = std::io::stdout().lock();
    write!(out, "{}", insp.report())?;
    out.flush()?;

    let errors = insp.count(Severity::Error);
    let warns = insp.count(Severity::Warn);
    if errors + warns > 0 {
        log_warn!("Anomalies: errors={errors} warns={warns}");
    } else {
        log_info!("No anomalies found");
    }

    Ok(())
}
