use crate::loader;
use crate::metrics::{compute_latency_metrics, compute_throughput};
use crate::model::{Measurement, ValueSize, WriteMode};
use anyhow::Result;
use std::path::Path;

/// Outcome of looking at a single latency file.
#[derive(Debug)]
pub(crate) enum FileOutcome {
    Analysed(Box<Measurement>),
    NotFound,
    Empty,
}

/// Read one latency file and reduce it to latency and throughput summaries.
pub(crate) fn analyse_file(dir: &Path, size: &ValueSize, mode: WriteMode) -> Result<FileOutcome> {
    let path = loader::latency_file_path(dir, mode, size);
    if !path.is_file() {
        return Ok(FileOutcome::NotFound);
    }

    let samples = loader::read_latencies(&path)?;
    let Some(latency) = compute_latency_metrics(&samples) else {
        return Ok(FileOutcome::Empty);
    };
    let throughput = compute_throughput(&samples, size.bytes);
    tracing::debug!(
        value_size = %size,
        mode = %mode,
        median_ms = latency.median_ms,
        gbps = ?throughput.gbps,
        "analysed latency file"
    );

    Ok(FileOutcome::Analysed(Box::new(Measurement {
        value_size: size.clone(),
        write_mode: mode,
        source: path,
        latency,
        throughput,
    })))
}
