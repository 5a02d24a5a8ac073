use crate::model::{LatencySummary, ThroughputSummary};

/// Bytes per gigabit (2^30 bits).
const BYTES_PER_GIGABIT: f64 = (1u64 << 30) as f64 / 8.0;

/// Compute fastest, mean, median, 99th percentile and tail latency from samples (ms).
pub fn compute_latency_metrics(samples: &[f64]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    Some(LatencySummary {
        samples: n as u64,
        fastest_ms: sorted[0],
        mean_ms: mean,
        median_ms: median(&sorted),
        p99_ms: percentile(&sorted, 99.0),
        tail_ms: sorted[n - 1],
    })
}

/// Median of already sorted values; the two middle values are averaged for even counts.
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Percentile `p` (0..=100) of sorted values, linearly interpolated between closest ranks.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Derive throughput assuming one request of `value_size_bytes` per latency sample.
pub fn compute_throughput(samples: &[f64], value_size_bytes: u64) -> ThroughputSummary {
    let total_time_s = samples.iter().sum::<f64>() / 1000.0;
    let total_bytes = value_size_bytes.saturating_mul(samples.len() as u64);
    let gbps = if total_time_s > 0.0 {
        Some((total_bytes as f64 / total_time_s) / BYTES_PER_GIGABIT)
    } else {
        None
    };
    ThroughputSummary {
        total_bytes,
        total_time_s,
        gbps,
    }
}
