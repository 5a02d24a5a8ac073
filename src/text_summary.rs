//! Text summary builder for CLI output.
//!
//! This module formats human-readable lines for text mode and the TUI summary tab.

use crate::model::AnalysisReport;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from an analysis report.
pub(crate) fn build_text_summary(report: &AnalysisReport) -> TextSummary {
    let mut lines = Vec::new();

    lines.push(format!(
        "Write latency summary ({} file(s) analysed, {} missing)",
        report.measurements.len(),
        report.missing.len()
    ));

    for m in &report.measurements {
        let l = &m.latency;
        let throughput = m
            .throughput
            .gbps
            .map(|g| format!("{:.3} Gbps", g))
            .unwrap_or_else(|| "n/a".to_string());
        lines.push(format!(
            "{} {}: n={} fastest {:.3} mean {:.3} median {:.3} p99 {:.3} tail {:.3} ms, throughput {}",
            m.value_size.label,
            m.write_mode.as_str(),
            l.samples,
            l.fastest_ms,
            l.mean_ms,
            l.median_ms,
            l.p99_ms,
            l.tail_ms,
            throughput
        ));
    }

    for path in &report.missing {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        lines.push(format!("File {} not found.", name));
    }

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatencySummary, Measurement, ThroughputSummary, WriteMode};
    use std::path::PathBuf;

    #[test]
    fn lists_measurements_then_missing_files() {
        let report = AnalysisReport {
            generated_utc: String::new(),
            value_sizes: vec!["64KB".parse().unwrap()],
            write_modes: WriteMode::ALL.to_vec(),
            measurements: vec![Measurement {
                value_size: "64KB".parse().unwrap(),
                write_mode: WriteMode::Concurrent,
                source: PathBuf::from("concurrent_write_latencies64KB.txt"),
                latency: LatencySummary {
                    samples: 10,
                    fastest_ms: 0.5,
                    mean_ms: 1.0,
                    median_ms: 0.9,
                    p99_ms: 2.0,
                    tail_ms: 2.5,
                },
                throughput: ThroughputSummary {
                    total_bytes: 655_360,
                    total_time_s: 0.01,
                    gbps: Some(0.48828125),
                },
            }],
            missing: vec![PathBuf::from("/data/seq_write_latencies64KB.txt")],
        };

        let summary = build_text_summary(&report);
        assert_eq!(summary.lines.len(), 3);
        assert!(summary.lines[0].contains("1 file(s) analysed, 1 missing"));
        assert!(summary.lines[1].starts_with("64KB concurrent: n=10 fastest 0.500"));
        assert!(summary.lines[1].contains("median 0.900"));
        assert!(summary.lines[1].contains("throughput 0.488 Gbps"));
        assert_eq!(summary.lines[2], "File seq_write_latencies64KB.txt not found.");
    }
}
