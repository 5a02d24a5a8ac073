//! Report persistence: JSON and CSV exports.

use crate::model::AnalysisReport;
use anyhow::{Context, Result};
use std::path::Path;

const CSV_HEADER: &str = "value_size,value_size_bytes,write_mode,samples,fastest_ms,mean_ms,median_ms,p99_ms,tail_ms,total_bytes,total_time_s,throughput_gbps";

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

pub fn export_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    ensure_parent(path)?;
    let data = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn render_csv(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for m in &report.measurements {
        let gbps = m
            .throughput
            .gbps
            .map(|v| v.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}\n",
            csv_escape(&m.value_size.label),
            m.value_size.bytes,
            m.write_mode,
            m.latency.samples,
            m.latency.fastest_ms,
            m.latency.mean_ms,
            m.latency.median_ms,
            m.latency.p99_ms,
            m.latency.tail_ms,
            m.throughput.total_bytes,
            m.throughput.total_time_s,
            gbps,
        ));
    }
    out
}

pub fn export_csv(path: &Path, report: &AnalysisReport) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, render_csv(report))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatencySummary, Measurement, ThroughputSummary, WriteMode};
    use std::path::PathBuf;

    fn report() -> AnalysisReport {
        AnalysisReport {
            generated_utc: "2026-01-01T00:00:00Z".into(),
            value_sizes: vec!["1KB".parse().unwrap(), "4KB".parse().unwrap()],
            write_modes: vec![WriteMode::Seq],
            measurements: vec![Measurement {
                value_size: "1KB".parse().unwrap(),
                write_mode: WriteMode::Seq,
                source: PathBuf::from("seq_write_latencies1KB.txt"),
                latency: LatencySummary {
                    samples: 2,
                    fastest_ms: 1.0,
                    mean_ms: 1.5,
                    median_ms: 1.5,
                    p99_ms: 1.99,
                    tail_ms: 2.0,
                },
                throughput: ThroughputSummary {
                    total_bytes: 2048,
                    total_time_s: 0.0,
                    gbps: None,
                },
            }],
            missing: vec![PathBuf::from("seq_write_latencies4KB.txt")],
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_measurement() {
        let csv = render_csv(&report());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "1KB,1024,seq,2,1,1.5,1.5,1.99,2,2048,0,");
    }

    #[test]
    fn json_export_round_trips_into_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        export_json(&path, &report()).unwrap();

        let parsed: AnalysisReport =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed.measurements.len(), 1);
        assert_eq!(parsed.missing, report().missing);
        assert_eq!(parsed.measurements[0].write_mode, WriteMode::Seq);
    }

    #[test]
    fn csv_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        export_csv(&path, &report()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("value_size,"));
    }
}
