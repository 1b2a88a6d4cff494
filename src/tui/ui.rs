use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Block, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs, Wrap,
};

use crate::dataset::types::ScoredRow;
use crate::output::formatter::{format_force, format_shift};
use crate::tui::app::{App, InputMode, Tab, PARAM_LABELS};
use crate::tui::theme::ThemeColors;

const TABS: [Tab; 3] = [Tab::Jobs, Tab::Scenario, Tab::TensionMap];

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(frame, app, header);
    match app.tab {
        Tab::Jobs => draw_jobs(frame, app, body),
        Tab::Scenario => draw_scenario(frame, app, body),
        Tab::TensionMap => draw_tension_map(frame, app, body),
    }
    draw_status_bar(frame, app, status);

    if app.input_mode == InputMode::Help {
        draw_help(frame, app);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = TABS.iter().map(|t| t.title());
    let selected = TABS.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style);
    frame.render_widget(tabs, area);
}

fn draw_jobs(frame: &mut Frame, app: &mut App, area: Rect) {
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let theme = app.theme.clone();

    let header = Row::new(["#", "Shift", "Tension", "Title", "Risk"]).style(theme.header_style);
    let rows: Vec<Row> = app
        .scored
        .rows()
        .map(|row| {
            let shift = row.equilibrium.shift;
            let shift_color = if shift < 0.0 {
                theme.shift_negative
            } else {
                theme.shift_positive
            };
            let cells = vec![
                Cell::from(row.index.to_string()).style(Style::new().fg(theme.index_color)),
                Cell::from(format_shift(shift)).style(Style::new().fg(shift_color)),
                Cell::from(format!("{:.3}", row.equilibrium.tension))
                    .style(Style::new().fg(theme.tension_color(row.equilibrium.tension))),
                Cell::from(row.job.title.clone()),
                Cell::from(row.job.risk_category.clone().unwrap_or_else(|| "-".to_string())),
            ];
            let styled = Row::new(cells);
            if row.index % 2 == 1 {
                styled.style(Style::new().bg(theme.row_alt_bg))
            } else {
                styled
            }
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme.row_selected)
        .block(Block::bordered().title(Span::styled("Jobs", theme.title_style)));

    frame.render_stateful_widget(table, list_area, &mut app.table_state);

    let detail = match app.selected_row() {
        Some(row) => detail_lines(&row, &theme),
        None => vec![Line::from("No row selected")],
    };
    let panel = Paragraph::new(detail)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(Span::styled("Equilibrium", theme.title_style)));
    frame.render_widget(panel, detail_area);
}

fn detail_lines(row: &ScoredRow, theme: &ThemeColors) -> Vec<Line<'static>> {
    let eq = row.equilibrium;
    let mut lines = vec![
        Line::from(Span::styled(row.job.title.clone(), theme.title_style)),
        Line::from(format!(
            "Risk: {}   Education: {}",
            row.job.risk_category.as_deref().unwrap_or("-"),
            row.job.education_level.as_deref().unwrap_or("-"),
        )),
        Line::from(""),
        Line::from(format!(
            "Center {:.3}   Shift {}   Tension {:.3}",
            eq.center,
            format_shift(eq.shift),
            eq.tension
        )),
        Line::from(format!("Resilience band [{:.3}, {:.3}]", eq.lower, eq.upper)),
        Line::from(""),
    ];

    lines.push(force_bar("Automation pressure", row.forces.automation_pressure, theme));
    lines.push(force_bar("Adaptability", row.forces.adaptability, theme));
    lines.push(force_bar("Transferability", row.forces.transferability, theme));
    lines.push(force_bar("Economic demand", row.forces.economic_demand, theme));
    lines.push(force_bar("AI augmentation", row.forces.ai_augmentation, theme));

    lines
}

/// One horizontal force bar centered on zero: negative values fill left
/// of the axis, positive fill right.
fn force_bar(label: &str, value: f64, theme: &ThemeColors) -> Line<'static> {
    const HALF: usize = 10;
    let filled = ((value.abs() * HALF as f64).round() as usize).min(HALF);
    let (neg, pos) = if value < 0.0 { (filled, 0) } else { (0, filled) };

    Line::from(vec![
        Span::raw(format!("{:<20} ", label)),
        Span::styled("░".repeat(HALF - neg), Style::new().fg(theme.bar_empty)),
        Span::styled("█".repeat(neg), Style::new().fg(theme.bar_negative)),
        Span::styled("│", Style::new().fg(theme.muted)),
        Span::styled("█".repeat(pos), Style::new().fg(theme.bar_positive)),
        Span::styled("░".repeat(HALF - pos), Style::new().fg(theme.bar_empty)),
        Span::raw(format!(" {}", format_force(value))),
    ])
}

fn draw_scenario(frame: &mut Frame, app: &App, area: Rect) {
    let [params_area, result_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(area);

    let theme = &app.theme;
    let target = app
        .table_state
        .selected()
        .and_then(|i| app.scored.row(i));

    let mut param_lines = vec![Line::from(match &target {
        Some(row) => format!("Target row [{}] {}", row.index, row.job.title),
        None => "No row selected on the Jobs tab".to_string(),
    })];
    param_lines.push(Line::from(""));
    for (i, label) in PARAM_LABELS.iter().enumerate() {
        let marker = if i == app.param_cursor { "> " } else { "  " };
        let line = format!("{}{:<32} {:.2}", marker, label, app.param_value(i));
        if i == app.param_cursor {
            param_lines.push(Line::from(Span::styled(line, theme.tab_active_style)));
        } else {
            param_lines.push(Line::from(line));
        }
    }

    let params = Paragraph::new(param_lines).block(
        Block::bordered().title(Span::styled("Scenario levers", theme.title_style)),
    );
    frame.render_widget(params, params_area);

    let result_lines = match (&app.scenario_result, app.scenario_row) {
        (Some(result), Some(index)) => {
            match (app.scored.row(index), result.row(index)) {
                (Some(base), Some(sim)) => comparison_lines(&base, &sim, theme),
                _ => vec![Line::from("Scenario row out of range")],
            }
        }
        _ => vec![
            Line::from("Press Enter to re-score the table with the selected"),
            Line::from("row perturbed. j/k select a lever, h/l adjust, x reset."),
        ],
    };

    let results = Paragraph::new(result_lines)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(Span::styled("Rebalanced equilibrium", theme.title_style)));
    frame.render_widget(results, result_area);
}

fn comparison_lines(base: &ScoredRow, sim: &ScoredRow, theme: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!(
            "Center {:.3} -> {:.3}   Shift {} -> {}",
            base.equilibrium.center,
            sim.equilibrium.center,
            format_shift(base.equilibrium.shift),
            format_shift(sim.equilibrium.shift),
        )),
        Line::from(format!(
            "Tension {:.3} -> {:.3}   Band [{:.3}, {:.3}] -> [{:.3}, {:.3}]",
            base.equilibrium.tension,
            sim.equilibrium.tension,
            base.equilibrium.lower,
            base.equilibrium.upper,
            sim.equilibrium.lower,
            sim.equilibrium.upper,
        )),
        Line::from(""),
    ];

    for (label, b, s) in [
        ("Automation pressure", base.forces.automation_pressure, sim.forces.automation_pressure),
        ("Adaptability", base.forces.adaptability, sim.forces.adaptability),
        ("Transferability", base.forces.transferability, sim.forces.transferability),
        ("Economic demand", base.forces.economic_demand, sim.forces.economic_demand),
        ("AI augmentation", base.forces.ai_augmentation, sim.forces.ai_augmentation),
    ] {
        let delta = s - b;
        let color = if delta < 0.0 {
            theme.shift_negative
        } else if delta > 0.0 {
            theme.shift_positive
        } else {
            theme.muted
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{:<20} {} -> ", label, format_force(b))),
            Span::styled(format_force(s), Style::new().fg(color)),
        ]));
    }

    lines
}

fn draw_tension_map(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let points = app.map_points();

    let title = match &app.risk_filter {
        Some(filter) => format!("Tension Map | risk: {} ({} jobs)", filter, points.len()),
        None => format!("Tension Map | all risks ({} jobs)", points.len()),
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::new().fg(theme.chart_point))
        .data(&points);

    let axis_style = Style::new().fg(theme.chart_axis);
    let chart = Chart::new(vec![dataset])
        .block(Block::bordered().title(Span::styled(title, theme.title_style)))
        .x_axis(
            Axis::default()
                .title("equilibrium shift")
                .style(axis_style)
                .bounds([-0.25, 0.25])
                .labels(["-0.25", "0.00", "+0.25"]),
        )
        .y_axis(
            Axis::default()
                .title("transition tension")
                .style(axis_style)
                .bounds([0.0, 2.0])
                .labels(["0.0", "1.0", "2.0"]),
        );

    frame.render_widget(chart, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = if let Some((message, _)) = &app.flash_message {
        Line::from(Span::styled(
            format!(" {}", message),
            Style::new().fg(theme.flash_success),
        ))
    } else {
        let keys: &[(&str, &str)] = match app.tab {
            Tab::Jobs => &[("j/k", "move"), ("tab", "switch"), ("?", "help"), ("q", "quit")],
            Tab::Scenario => &[
                ("j/k", "lever"),
                ("h/l", "adjust"),
                ("enter", "run"),
                ("x", "reset"),
                ("q", "quit"),
            ],
            Tab::TensionMap => &[("f", "filter"), ("tab", "switch"), ("q", "quit")],
        };
        let mut spans = Vec::new();
        for (key, action) in keys {
            spans.push(Span::styled(
                format!(" {}", key),
                Style::new().fg(theme.status_key_color),
            ));
            spans.push(Span::raw(format!(" {} ", action)));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(line).style(Style::new().bg(theme.status_bar_bg));
    frame.render_widget(bar, area);
}

fn draw_help(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(50, 60, frame.area());

    let lines = vec![
        Line::from(Span::styled("Keys", theme.popup_title)),
        Line::from(""),
        Line::from("  j / k / arrows   move selection"),
        Line::from("  tab              next tab"),
        Line::from("  enter            run scenario (Scenario tab)"),
        Line::from("  h / l            adjust selected lever"),
        Line::from("  x                reset scenario levers"),
        Line::from("  f                cycle risk filter (Tension Map)"),
        Line::from("  ?                this help"),
        Line::from("  q / ctrl-c       quit"),
        Line::from(""),
        Line::from("Forces are relative to the whole table; a scenario"),
        Line::from("re-scores every row so ranks stay meaningful."),
    ];

    frame.render_widget(Clear, area);
    let popup = Paragraph::new(lines).block(
        Block::bordered()
            .border_style(Style::new().fg(theme.popup_border))
            .title(Span::styled("Help", theme.popup_title)),
    );
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
