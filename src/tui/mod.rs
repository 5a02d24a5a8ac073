mod charts;
mod export;
mod help;
mod state;

use crate::cli::Cli;
use crate::engine::AnalysisEngine;
use crate::model::AnalysisConfig;
use crate::orchestrator;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Terminal,
};
use state::{KeyAction, UiState, TAB_LATENCY, TAB_SUMMARY, TAB_THROUGHPUT, TAB_TITLES};
use std::{io, time::Duration, time::Instant};

const NOTHING_TO_EXPORT: &str = "Nothing to export yet.";

/// Run the interactive viewer until the user quits.
pub fn run(args: Cli, cfg: AnalysisConfig) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let res = Terminal::new(CrosstermBackend::new(stdout))
        .context("create terminal")
        .and_then(|mut terminal| {
            terminal.clear().ok();
            run_loop(&mut terminal, &args, AnalysisEngine::new(cfg))
        });

    // Restore the terminal on every exit path.
    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Run the analysis and fold the outcome into the UI state.
fn reload(args: &Cli, engine: &AnalysisEngine, state: &mut UiState) {
    match engine.run() {
        Ok(report) => {
            let processed = orchestrator::process_report(args, &report);
            let missing = report.missing.len();
            let analysed = report.measurements.len();
            state.set_report(report);
            state.info = if processed.messages.is_empty() {
                format!(
                    "Analysed {} file(s) in {}, {} missing",
                    analysed,
                    engine.config().input_dir.display(),
                    missing
                )
            } else {
                processed.messages.join(" | ")
            };
        }
        Err(e) => {
            state.info = format!("Analysis failed: {e:#}");
        }
    }
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    args: &Cli,
    engine: AnalysisEngine,
) -> Result<()> {
    let mut state = UiState::default();
    reload(args, &engine, &mut state);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty || last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
            dirty = false;
        }

        if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
            continue;
        }
        let Ok(Event::Key(k)) = event::read() else {
            continue;
        };
        if k.kind != KeyEventKind::Press {
            continue;
        }
        dirty = true;

        match state.handle_key(k) {
            KeyAction::Quit => break Ok(()),
            KeyAction::Reload => reload(args, &engine, &mut state),
            KeyAction::ExportJson => {
                state.info = match state.report.as_ref() {
                    Some(report) => match export::export_report_json(report, args.export_json.as_deref()) {
                        Ok(p) => format!("Exported JSON: {}", p.display()),
                        Err(e) => format!("JSON export failed: {e:#}"),
                    },
                    None => NOTHING_TO_EXPORT.into(),
                };
            }
            KeyAction::ExportCsv => {
                state.info = match state.report.as_ref() {
                    Some(report) => match export::export_report_csv(report, args.export_csv.as_deref()) {
                        Ok(p) => format!("Exported CSV: {}", p.display()),
                        Err(e) => format!("CSV export failed: {e:#}"),
                    },
                    None => NOTHING_TO_EXPORT.into(),
                };
            }
            KeyAction::SaveCharts => save_charts(args, &mut state),
            KeyAction::CopySummary => {
                if state.summary_lines.is_empty() {
                    state.info = "No summary to copy yet.".into();
                } else {
                    let text = state.summary_lines.join("\n");
                    state.info = match export::copy_to_clipboard(&text) {
                        Ok(()) => "✓ Copied summary to clipboard".into(),
                        Err(e) => format!("Clipboard copy failed: {e:#}"),
                    };
                }
            }
            KeyAction::Redraw => {}
            KeyAction::Ignore => dirty = false,
        }
    }
}

/// Render the SVG charts into `--plot-dir`, or the working directory when none was given.
fn save_charts(args: &Cli, state: &mut UiState) {
    let Some(report) = state.report.as_ref() else {
        state.info = NOTHING_TO_EXPORT.into();
        return;
    };
    let dir = args
        .plot_dir
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    state.info = match crate::plot::render_all(report, &dir) {
        Ok(paths) => format!("Saved {} chart(s) to {}", paths.len(), dir.display()),
        Err(e) => format!("Chart render failed: {e:#}"),
    };
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(TAB_TITLES.iter().map(|t| Line::from(*t)).collect::<Vec<_>>())
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("cosmo-latency-stats"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        TAB_LATENCY => charts::draw_latency(chunks[1], f, state),
        TAB_THROUGHPUT => charts::draw_throughput(chunks[1], f, state),
        TAB_SUMMARY => draw_summary(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    let status = Paragraph::new(state.info.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);
}

fn draw_summary(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(report) = state.report.as_ref() {
        lines.push(Line::styled(
            format!("Generated: {}", report.generated_utc),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.extend(state.summary_lines.iter().skip(state.summary_scroll).map(|l| {
        if l.starts_with("File ") {
            Line::styled(l.as_str(), Style::default().fg(Color::LightRed))
        } else {
            Line::from(l.as_str())
        }
    }));

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(p, area);
}
