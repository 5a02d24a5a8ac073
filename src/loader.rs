//! Latency file naming and parsing.
//!
//! The benchmark harness writes one file per write mode and value size, holding
//! one latency in milliseconds per line.

use crate::model::{ValueSize, WriteMode};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub fn latency_file_name(mode: WriteMode, size: &ValueSize) -> String {
    format!("{}_write_latencies{}.txt", mode.as_str(), size.label)
}

pub fn latency_file_path(dir: &Path, mode: WriteMode, size: &ValueSize) -> PathBuf {
    dir.join(latency_file_name(mode, size))
}

/// Read one latency per line; blank lines are skipped.
pub fn read_latencies(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut latencies = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: f64 = trimmed.parse().with_context(|| {
            format!(
                "{}:{}: invalid latency {:?}",
                path.display(),
                idx + 1,
                trimmed
            )
        })?;
        if !value.is_finite() || value < 0.0 {
            bail!(
                "{}:{}: latency must be a finite, non-negative number (got {})",
                path.display(),
                idx + 1,
                trimmed
            );
        }
        latencies.push(value);
    }

    Ok(latencies)
}
