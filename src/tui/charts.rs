use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use super::state::UiState;
use crate::model::{Metric, WriteMode};
use crate::plot::present_runs;

pub fn mode_color(mode: WriteMode) -> Color {
    match mode {
        WriteMode::Seq => Color::Green,
        WriteMode::Concurrent => Color::Magenta,
    }
}

/// Points for one write mode: line segments between present values plus the markers.
struct ModePoints {
    mode: WriteMode,
    segments: Vec<Vec<(f64, f64)>>,
    markers: Vec<(f64, f64)>,
}

fn to_points(series: &[(WriteMode, Vec<Option<f64>>)]) -> Vec<ModePoints> {
    series
        .iter()
        .map(|(mode, values)| {
            let segments: Vec<Vec<(f64, f64)>> = present_runs(values)
                .into_iter()
                .map(|run| run.into_iter().map(|(i, y)| (i as f64, y)).collect())
                .collect();
            let markers = segments.iter().flatten().copied().collect();
            ModePoints {
                mode: *mode,
                segments,
                markers,
            }
        })
        .collect()
}

/// Low/high of the present values per mode, shown under the chart.
fn render_range_text<'a>(series: &[(WriteMode, Vec<Option<f64>>)], unit: &str) -> Line<'a> {
    let mut spans = Vec::new();
    for (mode, values) in series {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            continue;
        }
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        let lo = present.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let c = mode_color(*mode);
        spans.push(Span::styled(mode.label(), Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!(" {:.3}-{:.3} {}", lo, hi, unit),
            Style::default().fg(c),
        ));
    }
    if spans.is_empty() {
        spans.push(Span::raw("No data"));
    }
    Line::from(spans)
}

/// Render a line chart across value sizes with per-mode ranges inside the same bordered box.
pub fn render_series_chart(
    f: &mut Frame,
    area: Rect,
    title: Line,
    y_title: &str,
    unit: &str,
    labels: &[String],
    series: &[(WriteMode, Vec<Option<f64>>)],
) {
    // Get inner area (accounting for borders)
    let inner = if area.width > 2 && area.height > 2 {
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    } else {
        area
    };

    let chart_metrics = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)].as_ref())
        .split(inner);

    let points = to_points(series);
    let mut datasets = Vec::new();
    for mp in &points {
        let style = Style::default().fg(mode_color(mp.mode));
        for seg in &mp.segments {
            datasets.push(
                Dataset::default()
                    .graph_type(GraphType::Line)
                    .marker(symbols::Marker::Braille)
                    .style(style)
                    .data(seg),
            );
        }
        if !mp.markers.is_empty() {
            datasets.push(
                Dataset::default()
                    .name(mp.mode.label())
                    .graph_type(GraphType::Scatter)
                    .marker(symbols::Marker::Dot)
                    .style(style)
                    .data(&mp.markers),
            );
        }
    }

    let y_max = series
        .iter()
        .flat_map(|(_, v)| v.iter().flatten())
        .fold(0.0_f64, |a, b| a.max(*b));
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    let x_max = (labels.len().saturating_sub(1) as f64).max(1.0);

    let x_labels: Vec<Span> = labels
        .iter()
        .map(|l| Span::styled(l.clone(), Style::default().fg(Color::Gray)))
        .collect();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.2}", y_max / 2.0)),
        Span::raw(format!("{:.2}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("Value Size")
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(y_title.to_string())
                .bounds([0.0, y_max])
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));
    f.render_widget(chart, chart_metrics[0]);

    f.render_widget(
        Paragraph::new(render_range_text(series, unit)).alignment(Alignment::Center),
        chart_metrics[1],
    );

    // Render the border with title around the whole area
    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(block, area);
}

pub fn draw_latency(area: Rect, f: &mut Frame, state: &UiState) {
    let Some(report) = state.report.as_ref() else {
        let empty = Paragraph::new("No analysis loaded. Press r to read latency files.")
            .block(Block::default().borders(Borders::ALL).title("Latency"));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let mut selector: Vec<Span> = vec![Span::raw("Metric: ")];
    for (idx, metric) in Metric::ALL.iter().enumerate() {
        if idx > 0 {
            selector.push(Span::raw(" | "));
        }
        let style = if *metric == state.metric {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        selector.push(Span::styled(metric.name(), style));
    }
    selector.push(Span::raw(" - "));
    selector.push(Span::styled("←/→", Style::default().fg(Color::Magenta)));
    selector.push(Span::raw(" or "));
    selector.push(Span::styled("h/l", Style::default().fg(Color::Magenta)));
    selector.push(Span::raw(": cycle"));

    let header = Paragraph::new(vec![
        Line::from(selector),
        Line::from(format!(
            "{} file(s) analysed, {} missing",
            report.measurements.len(),
            report.missing.len()
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    let series: Vec<(WriteMode, Vec<Option<f64>>)> = report
        .write_modes
        .iter()
        .map(|&m| (m, report.metric_series(m, state.metric)))
        .collect();
    let title = Line::from(vec![
        Span::styled(state.metric.name(), Style::default().fg(Color::Yellow)),
        Span::raw(" Latency Evolution"),
    ]);
    render_series_chart(
        f,
        chunks[1],
        title,
        "Latency (ms)",
        "ms",
        &report.size_labels(),
        &series,
    );
}

pub fn draw_throughput(area: Rect, f: &mut Frame, state: &UiState) {
    let Some(report) = state.report.as_ref() else {
        let empty = Paragraph::new("No analysis loaded.")
            .block(Block::default().borders(Borders::ALL).title("Throughput"));
        f.render_widget(empty, area);
        return;
    };

    let series: Vec<(WriteMode, Vec<Option<f64>>)> = report
        .write_modes
        .iter()
        .map(|&m| (m, report.throughput_series(m)))
        .collect();
    render_series_chart(
        f,
        area,
        Line::from("Throughput Evolution by Value Size"),
        "Throughput (Gbps)",
        "Gbps",
        &report.size_labels(),
        &series,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_skip_missing_sizes() {
        let series = vec![
            (WriteMode::Seq, vec![Some(1.0), None, Some(3.0), Some(4.0)]),
            (WriteMode::Concurrent, vec![None, None, None, None]),
        ];
        let points = to_points(&series);
        assert_eq!(points[0].segments.len(), 2);
        assert_eq!(points[0].markers, vec![(0.0, 1.0), (2.0, 3.0), (3.0, 4.0)]);
        assert!(points[1].markers.is_empty());
    }

    #[test]
    fn range_text_lists_present_modes() {
        let series = vec![
            (WriteMode::Seq, vec![Some(2.0), Some(0.5)]),
            (WriteMode::Concurrent, vec![None, None]),
        ];
        let line = render_range_text(&series, "ms");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Seq Write 0.500-2.000 ms");

        let empty = render_range_text(&[(WriteMode::Seq, vec![None])], "ms");
        assert_eq!(empty.spans[0].content, "No data");
    }
}
