use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Where the raw dataset lives and where the processed table is cached.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Raw dataset CSV path.
    #[serde(default = "default_raw_csv")]
    pub raw_csv: PathBuf,

    /// Processed (scored) table cache path.
    #[serde(default = "default_processed")]
    pub processed: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_csv: default_raw_csv(),
            processed: default_processed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// "auto", "dark", or "light".
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Maximum number of points plotted on the tension map.
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            max_points: default_max_points(),
        }
    }
}

fn default_raw_csv() -> PathBuf {
    PathBuf::from("data/raw/ai_impact_jobs_2030.csv")
}

fn default_processed() -> PathBuf {
    PathBuf::from("data/processed/workforce_equilibrium.json")
}

fn default_theme() -> String {
    "auto".to_string()
}

fn default_max_points() -> usize {
    1200
}
