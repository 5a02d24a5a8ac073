//! Post-analysis processing utilities.
//!
//! Handles exports and chart rendering after an analysis completes.

use crate::cli::Cli;
use crate::model::AnalysisReport;
use crate::{plot, storage};

/// Result of post-analysis processing, ready for presentation layers.
pub(crate) struct ProcessedReport {
    pub messages: Vec<String>,
}

/// Apply the exports and plots requested on the command line, collecting outcome messages.
pub(crate) fn process_report(args: &Cli, report: &AnalysisReport) -> ProcessedReport {
    let mut messages = Vec::new();

    if let Some(export_path) = args.export_json.as_deref() {
        match storage::export_json(export_path, report) {
            Ok(_) => messages.push(format!("Exported JSON: {}", export_path.display())),
            Err(e) => messages.push(format!("Export JSON failed: {e:#}")),
        }
    }
    if let Some(export_path) = args.export_csv.as_deref() {
        match storage::export_csv(export_path, report) {
            Ok(_) => messages.push(format!("Exported CSV: {}", export_path.display())),
            Err(e) => messages.push(format!("Export CSV failed: {e:#}")),
        }
    }
    if let Some(dir) = args.plot_dir.as_deref() {
        match plot::render_all(report, dir) {
            Ok(paths) => messages.push(format!(
                "Saved {} chart(s) to {}",
                paths.len(),
                dir.display()
            )),
            Err(e) => messages.push(format!("Chart render failed: {e:#}")),
        }
    }

    ProcessedReport { messages }
}
