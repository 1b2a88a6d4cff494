use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::dataset::types::{ScoredRow, ScoredTable};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an equilibrium shift as a signed percentage ("+3.20%")
pub fn format_shift(shift: f64) -> String {
    format!("{:+.2}%", shift * 100.0)
}

/// Format a force value with its sign ("+0.413")
pub fn format_force(value: f64) -> String {
    format!("{:+.3}", value)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the scored table as a listing with columns:
/// Index, Shift, Tension, Title, Risk. Row order is table order, so the
/// printed index is the row identity used by `show` and `scenario`.
pub fn format_scored_table(table: &ScoredTable, use_colors: bool) -> String {
    if table.is_empty() {
        return "No jobs found.".to_string();
    }

    let term_width = get_terminal_width();

    // Index: 4 chars (fits "9999."), shift: 7 ("+12.34%"), tension: 5
    let index_width = 4;
    let shift_width = 7;
    let tension_width = 5;
    let separator = "  ";

    table
        .rows()
        .map(|row| {
            let index_str = format!("{:>width$}.", row.index, width = index_width);
            let shift_str = format!(
                "{:>width$}",
                format_shift(row.equilibrium.shift),
                width = shift_width
            );
            let tension_str = format!("{:>width$.3}", row.equilibrium.tension, width = tension_width);

            let risk = row.job.risk_category.as_deref().unwrap_or("-");
            let fixed_width = index_width + 1
                + shift_width
                + tension_width
                + separator.len() * 4
                + risk.chars().count();

            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_title(&row.job.title, width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_title(&row.job.title, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                row.job.title.clone()
            };

            if use_colors {
                let shift_colored = if row.equilibrium.shift < 0.0 {
                    shift_str.red().to_string()
                } else {
                    shift_str.green().to_string()
                };
                format!(
                    "{}{}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    separator,
                    shift_colored,
                    separator,
                    tension_str.bold(),
                    separator,
                    title,
                    separator,
                    risk.yellow()
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}{}{}",
                    index_str, separator, shift_str, separator, tension_str, separator, title,
                    separator, risk
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single scored row with detailed multi-line output, grouped
/// into job fields, core signals, forces, and equilibrium outputs.
pub fn format_job_detail(row: &ScoredRow, use_colors: bool) -> String {
    let mut out = String::new();

    let title = if use_colors {
        format!("[{}] {}", row.index, row.job.title.bold())
    } else {
        format!("[{}] {}", row.index, row.job.title)
    };
    out.push_str(&title);
    out.push('\n');

    if let Some(risk) = &row.job.risk_category {
        if use_colors {
            out.push_str(&format!("  Risk: {}\n", risk.yellow()));
        } else {
            out.push_str(&format!("  Risk: {}\n", risk));
        }
    }
    if let Some(edu) = &row.job.education_level {
        out.push_str(&format!("  Education: {}\n", edu));
    }

    out.push_str("\nCore signals:\n");
    for (label, value) in [
        ("AI exposure", row.job.ai_exposure),
        ("Automation probability", row.job.automation_probability),
        ("Tech growth", row.job.tech_growth),
        ("Average salary", row.job.avg_salary),
        ("Years experience", row.job.years_experience),
    ] {
        match value {
            Some(v) => out.push_str(&format!("  {}: {}\n", label, v)),
            None => out.push_str(&format!("  {}: -\n", label)),
        }
    }

    out.push_str("\nForces:\n");
    for (label, value) in [
        ("Automation pressure", row.forces.automation_pressure),
        ("Adaptability", row.forces.adaptability),
        ("Skill transferability", row.forces.transferability),
        ("Economic demand", row.forces.economic_demand),
        ("AI augmentation", row.forces.ai_augmentation),
    ] {
        let formatted = format_force(value);
        if use_colors {
            let colored = if value < 0.0 {
                formatted.red().to_string()
            } else {
                formatted.green().to_string()
            };
            out.push_str(&format!("  {}: {}\n", label, colored));
        } else {
            out.push_str(&format!("  {}: {}\n", label, formatted));
        }
    }

    let eq = row.equilibrium;
    out.push_str("\nEquilibrium:\n");
    out.push_str(&format!("  Shift: {}\n", format_shift(eq.shift)));
    out.push_str(&format!("  Center: {:.4}\n", eq.center));
    out.push_str(&format!(
        "  Resilience band: [{:.4}, {:.4}]\n",
        eq.lower, eq.upper
    ));
    out.push_str(&format!("  Tension: {:.4}", eq.tension));

    out
}

/// Format a base row and its counterfactual side by side.
pub fn format_scenario_comparison(base: &ScoredRow, sim: &ScoredRow, use_colors: bool) -> String {
    let mut out = String::new();

    if use_colors {
        out.push_str(&format!("[{}] {}\n\n", base.index, base.job.title.bold()));
    } else {
        out.push_str(&format!("[{}] {}\n\n", base.index, base.job.title));
    }

    out.push_str("Equilibrium (base -> scenario):\n");
    out.push_str(&format!(
        "  Shift: {} -> {}\n",
        format_shift(base.equilibrium.shift),
        format_shift(sim.equilibrium.shift)
    ));
    out.push_str(&format!(
        "  Center: {:.4} -> {:.4}\n",
        base.equilibrium.center, sim.equilibrium.center
    ));
    out.push_str(&format!(
        "  Resilience band: [{:.4}, {:.4}] -> [{:.4}, {:.4}]\n",
        base.equilibrium.lower,
        base.equilibrium.upper,
        sim.equilibrium.lower,
        sim.equilibrium.upper
    ));
    out.push_str(&format!(
        "  Tension: {:.4} -> {:.4}\n",
        base.equilibrium.tension, sim.equilibrium.tension
    ));

    out.push_str("\nForces (base -> scenario):\n");
    for (label, b, s) in [
        (
            "Automation pressure",
            base.forces.automation_pressure,
            sim.forces.automation_pressure,
        ),
        ("Adaptability", base.forces.adaptability, sim.forces.adaptability),
        (
            "Skill transferability",
            base.forces.transferability,
            sim.forces.transferability,
        ),
        (
            "Economic demand",
            base.forces.economic_demand,
            sim.forces.economic_demand,
        ),
        (
            "AI augmentation",
            base.forces.ai_augmentation,
            sim.forces.ai_augmentation,
        ),
    ] {
        out.push_str(&format!(
            "  {}: {} -> {}\n",
            label,
            format_force(b),
            format_force(s)
        ));
    }

    out.trim_end().to_string()
}

/// Summary line for `prepare`: row count plus the derived column names.
pub fn format_prepare_summary(table: &ScoredTable) -> String {
    let columns = [
        "education_score",
        "skill_mean",
        "skill_std",
        "skill_breadth",
        "skill_balance",
        "augmentation_proxy",
        "force_automation_pressure",
        "force_adaptability",
        "force_skill_transferability",
        "force_economic_demand",
        "force_ai_augmentation",
        "equilibrium_shift",
        "equilibrium_center",
        "equilibrium_lower",
        "equilibrium_upper",
        "transition_tension",
    ];

    format!(
        "Prepared processed dataset with {} rows ({} skill columns).\nDerived columns: {}",
        table.len(),
        table.table.skill_labels.len(),
        columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ingest::read_table;
    use crate::scoring::{engineer, score};

    fn sample_scored() -> ScoredTable {
        let csv = "\
Job_Title,Average_Salary,Education_Level,AI_Exposure_Index,Automation_Probability_2030,Risk_Category
Data Analyst,60000,Bachelor,0.5,0.4,Medium
Welder,40000,High School,0.2,0.8,High
Architect,90000,Master,0.7,0.1,Low
";
        score(&engineer(&read_table(csv.as_bytes()).unwrap()))
    }

    #[test]
    fn test_format_scored_table_empty() {
        let table = ScoredTable {
            table: Default::default(),
            features: vec![],
            forces: vec![],
            equilibrium: vec![],
        };
        assert_eq!(format_scored_table(&table, false), "No jobs found.");
    }

    #[test]
    fn test_format_scored_table_rows() {
        let table = sample_scored();
        let out = format_scored_table(&table, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Data Analyst"));
        assert!(lines[0].contains("Medium"));
        assert!(lines[0].trim_start().starts_with("0."));
    }

    #[test]
    fn test_format_job_detail_sections() {
        let table = sample_scored();
        let row = table.row(1).unwrap();
        let out = format_job_detail(&row, false);
        assert!(out.contains("[1] Welder"));
        assert!(out.contains("Risk: High"));
        assert!(out.contains("Core signals:"));
        assert!(out.contains("Forces:"));
        assert!(out.contains("Equilibrium:"));
        assert!(out.contains("Resilience band: ["));
    }

    #[test]
    fn test_format_job_detail_missing_signal() {
        let mut table = sample_scored();
        table.table.jobs[0].tech_growth = None;
        let row = table.row(0).unwrap();
        let out = format_job_detail(&row, false);
        assert!(out.contains("Tech growth: -"));
    }

    #[test]
    fn test_format_shift_sign() {
        assert_eq!(format_shift(0.032), "+3.20%");
        assert_eq!(format_shift(-0.1), "-10.00%");
    }

    #[test]
    fn test_format_force() {
        assert_eq!(format_force(0.4131), "+0.413");
        assert_eq!(format_force(-1.0), "-1.000");
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short", 10), "short");
        assert_eq!(truncate_title("a very long job title", 10), "a very ...");
    }

    #[test]
    fn test_scenario_comparison_contains_both_sides() {
        let table = sample_scored();
        let base = table.row(0).unwrap();
        let out = format_scenario_comparison(&base, &base, false);
        assert!(out.contains("base -> scenario"));
        assert!(out.contains("->"));
    }

    #[test]
    fn test_prepare_summary() {
        let table = sample_scored();
        let out = format_prepare_summary(&table);
        assert!(out.contains("3 rows"));
        assert!(out.contains("transition_tension"));
    }
}
