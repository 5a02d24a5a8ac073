use crate::model::AnalysisReport;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Default export file name derived from the report timestamp.
pub fn default_export_name(report: &AnalysisReport, extension: &str) -> String {
    let stamp = if report.generated_utc.is_empty() {
        "report".to_string()
    } else {
        report.generated_utc.replace(':', "-").replace('T', "_")
    };
    format!("cosmo-latency-{}.{}", stamp, extension)
}

fn export_path(target: Option<&Path>, report: &AnalysisReport, extension: &str) -> Result<PathBuf> {
    if let Some(p) = target {
        return Ok(p.to_path_buf());
    }
    let current_dir = std::env::current_dir().context("get current directory")?;
    Ok(current_dir.join(default_export_name(report, extension)))
}

/// Export JSON to the CLI-provided path, or a timestamped file in the current directory.
pub fn export_report_json(report: &AnalysisReport, target: Option<&Path>) -> Result<PathBuf> {
    let path = export_path(target, report, "json")?;
    crate::storage::export_json(&path, report)?;
    Ok(path)
}

pub fn export_report_csv(report: &AnalysisReport, target: Option<&Path>) -> Result<PathBuf> {
    let path = export_path(target, report, "csv")?;
    crate::storage::export_csv(&path, report)?;
    Ok(path)
}

/// Initialize the clipboard manager thread if not already initialized.
/// Each clipboard instance is kept alive briefly so clipboard managers on Linux can read it.
fn init_clipboard_manager() -> Result<&'static std_mpsc::Sender<String>> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();

        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        tx
    });

    CLIPBOARD_SENDER
        .get()
        .ok_or_else(|| anyhow::anyhow!("Failed to initialize clipboard manager"))
}

/// Queue text for the clipboard without blocking the UI thread.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = init_clipboard_manager()?;
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WriteMode;

    fn report(stamp: &str) -> AnalysisReport {
        AnalysisReport {
            generated_utc: stamp.to_string(),
            value_sizes: vec![],
            write_modes: WriteMode::ALL.to_vec(),
            measurements: vec![],
            missing: vec![],
        }
    }

    #[test]
    fn export_names_are_filesystem_safe() {
        assert_eq!(
            default_export_name(&report("2026-10-19T08:30:00Z"), "json"),
            "cosmo-latency-2026-10-19_08-30-00Z.json"
        );
        assert_eq!(default_export_name(&report(""), "csv"), "cosmo-latency-report.csv");
    }

    #[test]
    fn explicit_target_wins() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("r.csv");
        let written = export_report_csv(&report(""), Some(target.as_path())).unwrap();
        assert_eq!(written, target);
        assert!(target.is_file());
    }
}
