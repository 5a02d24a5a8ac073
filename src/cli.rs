use crate::engine::AnalysisEngine;
use crate::model::{AnalysisConfig, AnalysisReport, ValueSize, WriteMode};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::hash::Hash;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "cosmo-latency-stats",
    version,
    about = "Summarise cosmo write-benchmark latency files and plot comparisons"
)]
pub struct Cli {
    /// Directory containing `<mode>_write_latencies<size>.txt` files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Comma-separated value sizes to analyse
    #[arg(long, value_delimiter = ',', default_values_t = ValueSize::defaults())]
    pub value_sizes: Vec<ValueSize>,

    /// Comma-separated write modes to analyse
    #[arg(long, value_delimiter = ',', default_values_t = WriteMode::ALL.to_vec())]
    pub modes: Vec<WriteMode>,

    /// Print JSON report and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Run silently: suppress all output except errors
    #[arg(long)]
    pub silent: bool,

    /// Export the report as JSON
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Export the report as CSV
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Write SVG comparison charts into this directory
    #[arg(long)]
    pub plot_dir: Option<PathBuf>,
}

impl Cli {
    /// True when the interactive viewer will not be started.
    pub fn is_non_tui(&self) -> bool {
        self.silent || self.json || self.text || cfg!(not(feature = "tui"))
    }
}

fn ensure_unique<T: Eq + Hash + std::fmt::Display>(items: &[T], what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            bail!("{what} {item} given more than once");
        }
    }
    Ok(())
}

/// Build an `AnalysisConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<AnalysisConfig> {
    if args.value_sizes.is_empty() {
        bail!("at least one value size is required");
    }
    if args.modes.is_empty() {
        bail!("at least one write mode is required");
    }
    ensure_unique(&args.value_sizes, "value size")?;
    ensure_unique(&args.modes, "write mode")?;

    Ok(AnalysisConfig {
        input_dir: args.dir.clone(),
        value_sizes: args.value_sizes.clone(),
        write_modes: args.modes.clone(),
    })
}

pub fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;

    if !args.is_non_tui() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args, cfg);
        }
    }

    let report = AnalysisEngine::new(cfg).run()?;
    handle_outputs(&args, &report)?;

    if args.silent {
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = std::io::LineWriter::new(stdout.lock());
    if args.json {
        let json = serde_json::to_string_pretty(&report)?;
        writeln!(out, "{}", json)?;
    } else {
        let summary = crate::text_summary::build_text_summary(&report);
        for line in summary.lines {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Handle export and plot operations for non-interactive modes.
fn handle_outputs(args: &Cli, report: &AnalysisReport) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        crate::storage::export_json(p, report).context("export JSON")?;
        tracing::info!(path = %p.display(), "exported JSON");
    }
    if let Some(p) = args.export_csv.as_deref() {
        crate::storage::export_csv(p, report).context("export CSV")?;
        tracing::info!(path = %p.display(), "exported CSV");
    }
    if let Some(dir) = args.plot_dir.as_deref() {
        crate::plot::render_all(report, dir).context("render charts")?;
    }
    Ok(())
}
