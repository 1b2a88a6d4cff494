use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jobshift::dataset::{select_row, store};
use jobshift::output;
use jobshift::scoring::{run_scenario, validate_params, ScenarioParams};
use jobshift::tui::{resolve_theme, App};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_LOOKUP: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all jobs with shift and tension (default if no subcommand)
    List,
    /// Show equilibrium details for one job
    Show {
        /// Row index in the processed dataset
        #[arg(long)]
        index: Option<usize>,

        /// Substring match for the job title (case-insensitive)
        #[arg(long)]
        title: Option<String>,
    },
    /// Re-score the table with one job's inputs perturbed
    Scenario {
        /// Row index in the processed dataset
        #[arg(long)]
        index: Option<usize>,

        /// Substring match for the job title (case-insensitive)
        #[arg(long)]
        title: Option<String>,

        /// AI adoption speed (0.5-2.0); scales exposure and automation
        #[arg(long, default_value_t = 1.0)]
        adoption: f64,

        /// Regulation strictness (0-1); dampens automation probability
        #[arg(long, default_value_t = 0.0)]
        regulation: f64,

        /// Education investment (0-1); boosts adaptability proxies
        #[arg(long, default_value_t = 0.0)]
        education: f64,

        /// Corporate automation incentives (0-1); push automation up
        #[arg(long, default_value_t = 0.0)]
        incentives: f64,
    },
    /// Ingest the raw CSV, score it, and refresh the processed cache
    Prepare,
    /// Export the full scored table to CSV
    Export {
        /// Output path for the snapshot
        #[arg(long, default_value = "reports/workforce_equilibrium_snapshot.csv")]
        out: PathBuf,
    },
    /// Interactive viewer (jobs, scenario simulator, tension map)
    Tui,
}

#[derive(Parser, Debug)]
#[command(name = "jobshift")]
#[command(about = "Workforce disruption equilibrium diagnostics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/jobshift/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Recompute the processed table even if a cache exists
    #[arg(long, global = true)]
    fresh: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match jobshift::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Raw dataset: {}", config.data.raw_csv.display());
        eprintln!("Processed cache: {}", config.data.processed.display());
    }

    // Every command works off the processed table; `prepare` (and the
    // --fresh flag) rebuilds it from the raw CSV first.
    let rebuild = cli.fresh || matches!(command, Commands::Prepare);
    let scored = match store::load_processed(
        &config.data.raw_csv,
        &config.data.processed,
        rebuild,
        cli.verbose,
    ) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if scored.is_empty() {
        eprintln!("Processed dataset is empty.");
        std::process::exit(EXIT_DATA);
    }

    let use_colors = output::should_use_colors();

    match command {
        Commands::List => {
            println!("{}", output::format_scored_table(&scored, use_colors));

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} jobs", scored.len());
            }
        }
        Commands::Show { index, title } => {
            let idx = match select_row(&scored.table, index, title.as_deref()) {
                Ok(i) => i,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_LOOKUP);
                }
            };
            let row = scored.row(idx).expect("selected row index is validated");
            println!("{}", output::format_job_detail(&row, use_colors));
        }
        Commands::Scenario {
            index,
            title,
            adoption,
            regulation,
            education,
            incentives,
        } => {
            let params = ScenarioParams {
                ai_adoption: adoption,
                regulation,
                education_investment: education,
                corporate_incentives: incentives,
            };
            if let Err(errors) = validate_params(&params) {
                eprintln!("Scenario parameter errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            let idx = match select_row(&scored.table, index, title.as_deref()) {
                Ok(i) => i,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_LOOKUP);
                }
            };

            let sim = match run_scenario(&scored.table, idx, &params) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Scenario error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            let base_row = scored.row(idx).expect("selected row index is validated");
            let sim_row = sim.row(idx).expect("scenario preserves row order");
            println!(
                "{}",
                output::format_scenario_comparison(&base_row, &sim_row, use_colors)
            );
        }
        Commands::Prepare => {
            println!("{}", output::format_prepare_summary(&scored));
        }
        Commands::Export { out } => {
            if let Err(e) = store::export_csv(&scored, &out) {
                eprintln!("Export error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
            println!("Saved snapshot to: {}", out.display());
        }
        Commands::Tui => {
            let theme = resolve_theme(&config.viewer.theme);
            let app = App::new(scored, theme, config.viewer.max_points);
            if let Err(e) = jobshift::tui::run_tui(app) {
                eprintln!("Viewer error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
