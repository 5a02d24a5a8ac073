use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Errors produced when parsing value sizes and write modes from the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("value size is empty")]
    EmptyValueSize,
    #[error("value size {0:?} has no unit suffix (expected B, KB, MB or GB)")]
    MissingUnit(String),
    #[error("value size {0:?} does not start with a number")]
    InvalidNumber(String),
    #[error("value size {0:?} must be greater than zero")]
    ZeroValueSize(String),
    #[error("unknown write mode {0:?} (expected seq or concurrent)")]
    UnknownWriteMode(String),
}

/// A payload size as written in benchmark file names (e.g. `4KB`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueSize {
    pub label: String,
    pub bytes: u64,
}

impl ValueSize {
    /// Sizes used by the cosmo write benchmarks.
    pub const DEFAULT_LABELS: [&'static str; 5] = ["1KB", "4KB", "16KB", "64KB", "256KB"];

    pub fn defaults() -> Vec<ValueSize> {
        Self::DEFAULT_LABELS
            .iter()
            .filter_map(|l| l.parse().ok())
            .collect()
    }
}

impl FromStr for ValueSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.is_empty() {
            return Err(ParseError::EmptyValueSize);
        }
        let upper = label.to_ascii_uppercase();
        // Longer suffixes first so "KB" is not taken for "B".
        let (digits, multiplier) = [("GB", 1u64 << 30), ("MB", 1 << 20), ("KB", 1 << 10), ("B", 1)]
            .iter()
            .find_map(|(suffix, mult)| upper.strip_suffix(suffix).map(|d| (d, *mult)))
            .ok_or_else(|| ParseError::MissingUnit(label.to_string()))?;
        let n: u64 = digits
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidNumber(label.to_string()))?;
        if n == 0 {
            return Err(ParseError::ZeroValueSize(label.to_string()));
        }
        Ok(ValueSize {
            label: label.to_string(),
            bytes: n.saturating_mul(multiplier),
        })
    }
}

impl fmt::Display for ValueSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    Seq,
    Concurrent,
}

impl WriteMode {
    pub const ALL: [WriteMode; 2] = [WriteMode::Seq, WriteMode::Concurrent];

    /// Prefix used by the benchmark harness in latency file names.
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMode::Seq => "seq",
            WriteMode::Concurrent => "concurrent",
        }
    }

    /// Legend label for charts.
    pub fn label(self) -> &'static str {
        match self {
            WriteMode::Seq => "Seq Write",
            WriteMode::Concurrent => "Concurrent Write",
        }
    }
}

impl FromStr for WriteMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seq" => Ok(WriteMode::Seq),
            "concurrent" => Ok(WriteMode::Concurrent),
            other => Err(ParseError::UnknownWriteMode(other.to_string())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for one analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub input_dir: PathBuf,
    pub value_sizes: Vec<ValueSize>,
    pub write_modes: Vec<WriteMode>,
}

/// Latency statistics reported per value size and write mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Fastest,
    Mean,
    Median,
    P99,
    Tail,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Fastest,
        Metric::Mean,
        Metric::Median,
        Metric::P99,
        Metric::Tail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Fastest => "Fastest",
            Metric::Mean => "Mean",
            Metric::Median => "Median",
            Metric::P99 => "99th",
            Metric::Tail => "Tail",
        }
    }

    #[cfg(feature = "tui")]
    pub fn next(self) -> Metric {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[cfg(feature = "tui")]
    pub fn prev(self) -> Metric {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub samples: u64,
    pub fastest_ms: f64,
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p99_ms: f64,
    pub tail_ms: f64,
}

impl LatencySummary {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Fastest => self.fastest_ms,
            Metric::Mean => self.mean_ms,
            Metric::Median => self.median_ms,
            Metric::P99 => self.p99_ms,
            Metric::Tail => self.tail_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSummary {
    pub total_bytes: u64,
    pub total_time_s: f64,
    /// Gigabits (2^30 bits) per second; `None` when the total time is zero.
    pub gbps: Option<f64>,
}

/// Statistics for one latency file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub value_size: ValueSize,
    pub write_mode: WriteMode,
    pub source: PathBuf,
    pub latency: LatencySummary,
    pub throughput: ThroughputSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub generated_utc: String,
    pub value_sizes: Vec<ValueSize>,
    pub write_modes: Vec<WriteMode>,
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub missing: Vec<PathBuf>,
}

impl AnalysisReport {
    pub fn find(&self, size_label: &str, mode: WriteMode) -> Option<&Measurement> {
        self.measurements
            .iter()
            .find(|m| m.write_mode == mode && m.value_size.label == size_label)
    }

    /// One slot per requested value size, `None` where no file was analysed.
    pub fn metric_series(&self, mode: WriteMode, metric: Metric) -> Vec<Option<f64>> {
        self.value_sizes
            .iter()
            .map(|size| self.find(&size.label, mode).map(|m| m.latency.value(metric)))
            .collect()
    }

    pub fn throughput_series(&self, mode: WriteMode) -> Vec<Option<f64>> {
        self.value_sizes
            .iter()
            .map(|size| {
                self.find(&size.label, mode)
                    .and_then(|m| m.throughput.gbps)
            })
            .collect()
    }

    pub fn size_labels(&self) -> Vec<String> {
        self.value_sizes.iter().map(|s| s.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(label: &str, mode: WriteMode, median: f64, gbps: Option<f64>) -> Measurement {
        Measurement {
            value_size: label.parse().unwrap(),
            write_mode: mode,
            source: PathBuf::from(format!("{}_write_latencies{}.txt", mode, label)),
            latency: LatencySummary {
                samples: 3,
                fastest_ms: median - 1.0,
                mean_ms: median,
                median_ms: median,
                p99_ms: median + 1.0,
                tail_ms: median + 2.0,
            },
            throughput: ThroughputSummary {
                total_bytes: 3,
                total_time_s: 1.0,
                gbps,
            },
        }
    }

    #[test]
    fn parses_value_sizes() {
        let kb: ValueSize = "4KB".parse().unwrap();
        assert_eq!(kb.bytes, 4096);
        assert_eq!(kb.label, "4KB");

        let b: ValueSize = "512B".parse().unwrap();
        assert_eq!(b.bytes, 512);

        let mb: ValueSize = "2mb".parse().unwrap();
        assert_eq!(mb.bytes, 2 * 1024 * 1024);
        assert_eq!(mb.label, "2mb");
    }

    #[test]
    fn rejects_bad_value_sizes() {
        assert_eq!("".parse::<ValueSize>(), Err(ParseError::EmptyValueSize));
        assert!(matches!("16".parse::<ValueSize>(), Err(ParseError::MissingUnit(_))));
        assert!(matches!("xKB".parse::<ValueSize>(), Err(ParseError::InvalidNumber(_))));
        assert!(matches!("0KB".parse::<ValueSize>(), Err(ParseError::ZeroValueSize(_))));
    }

    #[test]
    fn default_value_sizes_are_ordered() {
        let labels: Vec<_> = ValueSize::defaults().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["1KB", "4KB", "16KB", "64KB", "256KB"]);
    }

    #[test]
    fn parses_write_modes() {
        assert_eq!("seq".parse::<WriteMode>().unwrap(), WriteMode::Seq);
        assert_eq!("Concurrent".parse::<WriteMode>().unwrap(), WriteMode::Concurrent);
        assert!("random".parse::<WriteMode>().is_err());
        assert_eq!(WriteMode::Concurrent.label(), "Concurrent Write");
    }

    #[cfg(feature = "tui")]
    #[test]
    fn metric_cycling_wraps() {
        assert_eq!(Metric::Tail.next(), Metric::Fastest);
        assert_eq!(Metric::Fastest.prev(), Metric::Tail);
        assert_eq!(Metric::Median.next(), Metric::P99);
    }

    #[test]
    fn metric_names_match_chart_captions() {
        let names: Vec<_> = Metric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Fastest", "Mean", "Median", "99th", "Tail"]);
    }

    #[test]
    fn series_leave_gaps_for_missing_files() {
        let report = AnalysisReport {
            generated_utc: String::new(),
            value_sizes: vec!["1KB".parse().unwrap(), "4KB".parse().unwrap(), "16KB".parse().unwrap()],
            write_modes: vec![WriteMode::Seq],
            measurements: vec![
                measurement("1KB", WriteMode::Seq, 1.0, Some(0.5)),
                measurement("16KB", WriteMode::Seq, 3.0, None),
            ],
            missing: vec![PathBuf::from("seq_write_latencies4KB.txt")],
        };

        assert_eq!(
            report.metric_series(WriteMode::Seq, Metric::Median),
            vec![Some(1.0), None, Some(3.0)]
        );
        assert_eq!(report.throughput_series(WriteMode::Seq), vec![Some(0.5), None, None]);
        assert_eq!(
            report.metric_series(WriteMode::Concurrent, Metric::Tail),
            vec![None, None, None]
        );
    }
}
