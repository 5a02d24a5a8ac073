use crate::model::{AnalysisReport, Metric};
use crate::text_summary::build_text_summary;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const TAB_TITLES: [&str; 4] = ["Latency", "Throughput", "Summary", "Help"];
pub const TAB_LATENCY: usize = 0;
pub const TAB_THROUGHPUT: usize = 1;
pub const TAB_SUMMARY: usize = 2;
pub const TAB_HELP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Reload,
    ExportJson,
    ExportCsv,
    SaveCharts,
    CopySummary,
    Redraw,
    Ignore,
}

pub struct UiState {
    pub tab: usize,
    pub metric: Metric,
    pub info: String,
    pub report: Option<AnalysisReport>,
    pub summary_lines: Vec<String>,
    pub summary_scroll: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            metric: Metric::Median,
            info: String::new(),
            report: None,
            summary_lines: Vec::new(),
            summary_scroll: 0,
        }
    }
}

impl UiState {
    /// Replace the displayed report and rebuild the summary lines.
    pub fn set_report(&mut self, report: AnalysisReport) {
        self.summary_lines = build_text_summary(&report).lines;
        self.summary_scroll = self
            .summary_scroll
            .min(self.summary_lines.len().saturating_sub(1));
        self.report = Some(report);
    }

    pub fn next_tab(&mut self) {
        self.tab = (self.tab + 1) % TAB_TITLES.len();
    }

    /// Apply navigation keys to the state; keys with side effects come back as actions.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => KeyAction::Quit,
            (_, KeyCode::Char('r')) => KeyAction::Reload,
            (_, KeyCode::Char('e')) => KeyAction::ExportJson,
            (_, KeyCode::Char('c')) => KeyAction::ExportCsv,
            (_, KeyCode::Char('s')) => KeyAction::SaveCharts,
            (_, KeyCode::Char('y')) => KeyAction::CopySummary,
            (_, KeyCode::Tab) => {
                self.next_tab();
                KeyAction::Redraw
            }
            (_, KeyCode::Char('?')) => {
                self.tab = TAB_HELP;
                KeyAction::Redraw
            }
            (_, KeyCode::Left) | (_, KeyCode::Char('h')) if self.tab == TAB_LATENCY => {
                self.metric = self.metric.prev();
                KeyAction::Redraw
            }
            (_, KeyCode::Right) | (_, KeyCode::Char('l')) if self.tab == TAB_LATENCY => {
                self.metric = self.metric.next();
                KeyAction::Redraw
            }
            (_, KeyCode::Up) | (_, KeyCode::Char('k')) if self.tab == TAB_SUMMARY => {
                self.scroll_summary(false);
                KeyAction::Redraw
            }
            (_, KeyCode::Down) | (_, KeyCode::Char('j')) if self.tab == TAB_SUMMARY => {
                self.scroll_summary(true);
                KeyAction::Redraw
            }
            _ => KeyAction::Ignore,
        }
    }

    pub fn scroll_summary(&mut self, down: bool) {
        if down {
            if self.summary_scroll + 1 < self.summary_lines.len() {
                self.summary_scroll += 1;
            }
        } else {
            self.summary_scroll = self.summary_scroll.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WriteMode;
    use std::path::PathBuf;

    fn report(missing: usize) -> AnalysisReport {
        AnalysisReport {
            generated_utc: String::new(),
            value_sizes: vec!["1KB".parse().unwrap()],
            write_modes: WriteMode::ALL.to_vec(),
            measurements: vec![],
            missing: (0..missing)
                .map(|i| PathBuf::from(format!("missing{i}.txt")))
                .collect(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_exports_csv() {
        let mut state = UiState::default();
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(state.handle_key(key(KeyCode::Char('c'))), KeyAction::ExportCsv);
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);
    }

    #[test]
    fn side_effect_keys_map_to_actions() {
        let mut state = UiState::default();
        assert_eq!(state.handle_key(key(KeyCode::Char('r'))), KeyAction::Reload);
        assert_eq!(state.handle_key(key(KeyCode::Char('e'))), KeyAction::ExportJson);
        assert_eq!(state.handle_key(key(KeyCode::Char('s'))), KeyAction::SaveCharts);
        assert_eq!(state.handle_key(key(KeyCode::Char('y'))), KeyAction::CopySummary);
        assert_eq!(state.handle_key(key(KeyCode::Char('x'))), KeyAction::Ignore);
    }

    #[test]
    fn metric_cycles_only_on_latency_tab() {
        let mut state = UiState::default();
        assert_eq!(state.metric, Metric::Median);
        assert_eq!(state.handle_key(key(KeyCode::Char('l'))), KeyAction::Redraw);
        assert_eq!(state.metric, Metric::P99);
        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Char('h')));
        assert_eq!(state.metric, Metric::Mean);

        state.tab = TAB_THROUGHPUT;
        assert_eq!(state.handle_key(key(KeyCode::Char('l'))), KeyAction::Ignore);
        assert_eq!(state.metric, Metric::Mean);
    }

    #[test]
    fn question_mark_opens_help_and_tab_cycles() {
        let mut state = UiState::default();
        state.handle_key(key(KeyCode::Char('?')));
        assert_eq!(state.tab, TAB_HELP);
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.tab, TAB_LATENCY);
    }

    #[test]
    fn summary_keys_scroll_only_on_summary_tab() {
        let mut state = UiState::default();
        state.set_report(report(2));
        assert_eq!(state.handle_key(key(KeyCode::Char('j'))), KeyAction::Ignore);
        assert_eq!(state.summary_scroll, 0);

        state.tab = TAB_SUMMARY;
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(state.summary_scroll, 2);
        state.handle_key(key(KeyCode::Char('k')));
        assert_eq!(state.summary_scroll, 1);
    }

    #[test]
    fn tabs_wrap_around() {
        let mut state = UiState::default();
        for _ in 0..TAB_TITLES.len() {
            state.next_tab();
        }
        assert_eq!(state.tab, 0);
    }

    #[test]
    fn summary_scroll_is_clamped() {
        let mut state = UiState::default();
        state.set_report(report(2));
        // header + two missing lines
        assert_eq!(state.summary_lines.len(), 3);
        for _ in 0..10 {
            state.scroll_summary(true);
        }
        assert_eq!(state.summary_scroll, 2);

        state.set_report(report(0));
        assert_eq!(state.summary_scroll, 0);
        state.scroll_summary(false);
        assert_eq!(state.summary_scroll, 0);
    }
}
