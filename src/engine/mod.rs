mod latency;

use crate::loader;
use crate::model::{AnalysisConfig, AnalysisReport};
use anyhow::{bail, Context, Result};
use latency::FileOutcome;

pub struct AnalysisEngine {
    cfg: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(cfg: AnalysisConfig) -> Self {
        Self { cfg }
    }

    #[cfg(feature = "tui")]
    pub fn config(&self) -> &AnalysisConfig {
        &self.cfg
    }

    /// Walk every value size (outer) and write mode (inner), skipping absent files.
    pub fn run(&self) -> Result<AnalysisReport> {
        let dir = &self.cfg.input_dir;
        let meta = std::fs::metadata(dir)
            .with_context(|| format!("input directory {}", dir.display()))?;
        if !meta.is_dir() {
            bail!("{} is not a directory", dir.display());
        }

        let mut measurements = Vec::new();
        let mut missing = Vec::new();

        for size in &self.cfg.value_sizes {
            for &mode in &self.cfg.write_modes {
                let outcome = latency::analyse_file(dir, size, mode)
                    .with_context(|| format!("analyse {} {}", mode, size))?;
                match outcome {
                    FileOutcome::Analysed(m) => measurements.push(*m),
                    FileOutcome::NotFound => {
                        let name = loader::latency_file_name(mode, size);
                        tracing::warn!("File {} not found.", name);
                        missing.push(dir.join(name));
                    }
                    FileOutcome::Empty => {
                        let name = loader::latency_file_name(mode, size);
                        tracing::warn!("File {} contains no latencies, skipping.", name);
                        missing.push(dir.join(name));
                    }
                }
            }
        }

        tracing::info!(
            analysed = measurements.len(),
            missing = missing.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            generated_utc: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "now".into()),
            value_sizes: self.cfg.value_sizes.clone(),
            write_modes: self.cfg.write_modes.clone(),
            measurements,
            missing,
        })
    }
}
