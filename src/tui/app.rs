use std::time::Instant;

use crate::dataset::types::{ScoredRow, ScoredTable};
use crate::scoring::{run_scenario, ScenarioParams};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Jobs,
    Scenario,
    TensionMap,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Jobs => Tab::Scenario,
            Tab::Scenario => Tab::TensionMap,
            Tab::TensionMap => Tab::Jobs,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Jobs => "Jobs",
            Tab::Scenario => "Scenario",
            Tab::TensionMap => "Tension Map",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

/// The four adjustable scenario levers, in display order.
pub const PARAM_LABELS: [&str; 4] = [
    "AI adoption speed",
    "Regulation strictness",
    "Education investment",
    "Corporate automation incentives",
];

pub struct App {
    pub scored: ScoredTable,
    pub theme: ThemeColors,
    pub max_points: usize,

    pub tab: Tab,
    pub input_mode: InputMode,
    pub table_state: ratatui::widgets::TableState,

    // Scenario tab state. The target row is whatever is selected on the
    // Jobs tab; results are recomputed on demand, never automatically.
    pub scenario_params: ScenarioParams,
    pub param_cursor: usize,
    pub scenario_result: Option<ScoredTable>,
    pub scenario_row: Option<usize>,

    // Tension map filter: None = all risk categories.
    pub risk_filter: Option<String>,

    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(scored: ScoredTable, theme: ThemeColors, max_points: usize) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !scored.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            scored,
            theme,
            max_points,
            tab: Tab::Jobs,
            input_mode: InputMode::Normal,
            table_state,
            scenario_params: ScenarioParams {
                ai_adoption: 1.0,
                regulation: 0.2,
                education_investment: 0.3,
                corporate_incentives: 0.3,
            },
            param_cursor: 0,
            scenario_result: None,
            scenario_row: None,
            risk_filter: None,
            flash_message: None,
            should_quit: false,
        }
    }

    pub fn next_row(&mut self) {
        let len = self.scored.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.scored.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_row(&self) -> Option<ScoredRow<'_>> {
        self.table_state.selected().and_then(|i| self.scored.row(i))
    }

    pub fn toggle_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn next_param(&mut self) {
        self.param_cursor = (self.param_cursor + 1) % PARAM_LABELS.len();
    }

    pub fn previous_param(&mut self) {
        self.param_cursor = (self.param_cursor + PARAM_LABELS.len() - 1) % PARAM_LABELS.len();
    }

    /// Step the selected parameter by `steps` increments of 0.05, clamped
    /// to its slider range.
    pub fn adjust_param(&mut self, steps: i32) {
        let delta = 0.05 * steps as f64;
        let p = &mut self.scenario_params;
        match self.param_cursor {
            0 => p.ai_adoption = (p.ai_adoption + delta).clamp(0.5, 2.0),
            1 => p.regulation = (p.regulation + delta).clamp(0.0, 1.0),
            2 => p.education_investment = (p.education_investment + delta).clamp(0.0, 1.0),
            _ => p.corporate_incentives = (p.corporate_incentives + delta).clamp(0.0, 1.0),
        }
        // Results are stale once a lever moves.
        self.scenario_result = None;
    }

    pub fn param_value(&self, index: usize) -> f64 {
        match index {
            0 => self.scenario_params.ai_adoption,
            1 => self.scenario_params.regulation,
            2 => self.scenario_params.education_investment,
            _ => self.scenario_params.corporate_incentives,
        }
    }

    pub fn reset_params(&mut self) {
        self.scenario_params = ScenarioParams::default();
        self.scenario_result = None;
        self.show_flash("Scenario parameters reset".to_string());
    }

    /// Re-score the whole table with the selected row perturbed.
    pub fn run_selected_scenario(&mut self) {
        let Some(index) = self.table_state.selected() else {
            self.show_flash("No row selected".to_string());
            return;
        };
        match run_scenario(&self.scored.table, index, &self.scenario_params) {
            Ok(result) => {
                self.scenario_result = Some(result);
                self.scenario_row = Some(index);
                self.show_flash(format!("Scenario re-scored for row {}", index));
            }
            Err(e) => self.show_flash(format!("Scenario failed: {}", e)),
        }
    }

    /// Cycle the tension map risk filter: all -> each category -> all.
    pub fn cycle_risk_filter(&mut self) {
        let categories = self.risk_categories();
        if categories.is_empty() {
            return;
        }
        self.risk_filter = match &self.risk_filter {
            None => Some(categories[0].clone()),
            Some(current) => categories
                .iter()
                .position(|c| c == current)
                .and_then(|i| categories.get(i + 1))
                .cloned(),
        };
    }

    pub fn risk_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .scored
            .table
            .jobs
            .iter()
            .filter_map(|j| j.risk_category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// (shift, tension) points for the tension map, honoring the risk
    /// filter and the configured point cap.
    pub fn map_points(&self) -> Vec<(f64, f64)> {
        self.scored
            .rows()
            .filter(|row| match &self.risk_filter {
                None => true,
                Some(filter) => row.job.risk_category.as_deref() == Some(filter.as_str()),
            })
            .map(|row| (row.equilibrium.shift, row.equilibrium.tension))
            .take(self.max_points)
            .collect()
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, at)) = &self.flash_message {
            if at.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }
}
