//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Shift direction colors
    pub shift_negative: Color,
    pub shift_positive: Color,

    // Tension colors (traffic light pattern)
    pub tension_high: Color,
    pub tension_mid: Color,
    pub tension_low: Color,

    // Force bar colors
    pub bar_negative: Color,
    pub bar_positive: Color,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,

    // Tension map colors
    pub chart_point: Color,
    pub chart_axis: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            shift_negative: Color::Red,
            shift_positive: Color::Green,
            tension_high: Color::Red,
            tension_mid: Color::Yellow,
            tension_low: Color::Green,
            bar_negative: Color::Red,
            bar_positive: Color::Green,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            chart_point: Color::Cyan,
            chart_axis: Color::Gray,
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            shift_negative: Color::Red,
            shift_positive: Color::Indexed(28),
            tension_high: Color::Red,
            tension_mid: Color::Indexed(130),
            tension_low: Color::Indexed(28),
            bar_negative: Color::Red,
            bar_positive: Color::Indexed(28),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(245),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(240),
            title_color: Color::Blue,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            chart_point: Color::Blue,
            chart_axis: Color::Indexed(240),
        }
    }

    /// Returns the appropriate color for a tension value
    pub fn tension_color(&self, tension: f64) -> Color {
        if tension >= 1.0 {
            self.tension_high
        } else if tension >= 0.5 {
            self.tension_mid
        } else {
            self.tension_low
        }
    }
}

/// Resolve the configured theme name ("auto", "dark", "light") to a
/// palette. Auto probes the terminal background luma and falls back to
/// dark when the probe fails.
pub fn resolve_theme(setting: &str) -> ThemeColors {
    match setting {
        "dark" => ThemeColors::dark(),
        "light" => ThemeColors::light(),
        _ => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
