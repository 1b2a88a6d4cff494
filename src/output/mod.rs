pub mod formatter;

pub use formatter::{
    format_force, format_job_detail, format_prepare_summary, format_scenario_comparison,
    format_scored_table, format_shift, should_use_colors,
};
