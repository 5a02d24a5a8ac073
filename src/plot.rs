//! SVG comparison charts: latency metrics and throughput across value sizes.

use crate::model::{AnalysisReport, Metric, WriteMode};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const EVOLUTION_FILE: &str = "latency_evolution.svg";
pub const THROUGHPUT_FILE: &str = "throughput_evolution.svg";

const EVOLUTION_SIZE: (u32, u32) = (2000, 500);
const THROUGHPUT_SIZE: (u32, u32) = (1000, 500);
const FONT: &str = "sans-serif";

const SEQ_COLOR: RGBColor = RGBColor(31, 119, 180);
const CONCURRENT_COLOR: RGBColor = RGBColor(255, 127, 14);

type Series = (WriteMode, Vec<Option<f64>>);

fn mode_color(mode: WriteMode) -> RGBColor {
    match mode {
        WriteMode::Seq => SEQ_COLOR,
        WriteMode::Concurrent => CONCURRENT_COLOR,
    }
}

/// Split a series into runs of consecutive present points, keyed by x index.
pub(crate) fn present_runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) => current.push((i, *y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn y_upper(series: &[Series]) -> f64 {
    let max = series
        .iter()
        .flat_map(|(_, values)| values.iter().flatten())
        .fold(0.0_f64, |a, b| a.max(*b));
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    labels: &[String],
    series: &[Series],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = labels.len().max(1) as i32;
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_upper(series))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Value Size")
        .y_desc(y_desc)
        .draw()?;

    let mut labelled = false;
    for (mode, values) in series {
        let color = mode_color(*mode);
        for run in present_runs(values) {
            chart.draw_series(LineSeries::new(
                run.into_iter()
                    .map(|(i, y)| (SegmentValue::CenterOf(i as i32), y)),
                color.stroke_width(2),
            ))?;
        }

        let points: Vec<(i32, f64)> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| (i as i32, y)))
            .collect();
        if points.is_empty() {
            continue;
        }
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|(i, y)| Circle::new((SegmentValue::CenterOf(i), y), 4, color.filled())),
            )?
            .label(mode.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        labelled = true;
    }

    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// One panel per latency metric, one line per write mode.
pub fn render_evolution_chart(report: &AnalysisReport, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, EVOLUTION_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Evolution of Metrics by Value Size", (FONT, 26))?;
    let labels = report.size_labels();

    let panels = root.split_evenly((1, Metric::ALL.len()));
    for (panel, metric) in panels.iter().zip(Metric::ALL) {
        let series: Vec<Series> = report
            .write_modes
            .iter()
            .map(|&mode| (mode, report.metric_series(mode, metric)))
            .collect();
        draw_panel(
            panel,
            &format!("{} Latency Evolution", metric.name()),
            "Latency (ms)",
            &labels,
            &series,
        )?;
    }

    root.present()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn render_throughput_chart(report: &AnalysisReport, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, THROUGHPUT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Throughput Evolution by Value Size", (FONT, 26))?;

    let series: Vec<Series> = report
        .write_modes
        .iter()
        .map(|&mode| (mode, report.throughput_series(mode)))
        .collect();
    draw_panel(
        &root,
        "Throughput (Gbps)",
        "Throughput (Gbps)",
        &report.size_labels(),
        &series,
    )?;

    root.present()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write both charts into `dir`, returning the written paths.
pub fn render_all(report: &AnalysisReport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;

    let evolution = dir.join(EVOLUTION_FILE);
    render_evolution_chart(report, &evolution)?;
    let throughput = dir.join(THROUGHPUT_FILE);
    render_throughput_chart(report, &throughput)?;

    tracing::info!(dir = %dir.display(), "charts written");
    Ok(vec![evolution, throughput])
}
