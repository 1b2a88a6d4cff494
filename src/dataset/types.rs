use serde::{Deserialize, Serialize};

/// One job record as ingested from the raw dataset.
///
/// Numeric fields are `None` when the source column is absent or the value
/// failed numeric coercion. Malformed rows are data, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub risk_category: Option<String>,
    pub education_level: Option<String>,
    pub avg_salary: Option<f64>,
    pub years_experience: Option<f64>,
    pub ai_exposure: Option<f64>,
    pub tech_growth: Option<f64>,
    pub automation_probability: Option<f64>,
    /// Per-row values for the skill columns in `JobTable::skill_labels`,
    /// same order, same length.
    pub skills: Vec<Option<f64>>,
}

/// The full working table. Row identity is positional: index 0 here is
/// index 0 in every derived table, the CLI, and the scenario selector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobTable {
    /// Skill column names present in the source schema (any subset of
    /// Skill_1..Skill_10).
    pub skill_labels: Vec<String>,
    pub jobs: Vec<Job>,
}

impl JobTable {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Engineered attributes for one row. Derived from the raw fields only;
/// no dependency on any other row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Ordinal education score in [0, 1]; 0.6 for unknown labels.
    pub education_score: f64,
    /// Mean over the row's present skill values. `None` when the row has
    /// no skill values (or the table has no skill columns at all).
    pub skill_mean: Option<f64>,
    /// Population std over present skill values; `None` only when the
    /// table has no skill columns.
    pub skill_std: Option<f64>,
    /// Count of skills strictly above 0.35, as an integer-valued float.
    pub skill_breadth: f64,
    /// 1 / (1 + std), clamped to [0, 1]. 0.5 neutral without skill data.
    pub skill_balance: f64,
    /// exposure * (1 - automation), clamped to [0, 1].
    pub augmentation_proxy: f64,
}

/// The five directional forces, each in [-1, 1], relative to the table the
/// row was scored in. Automation pressure is positive for high pressure;
/// its sign is flipped only when weighted into the shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forces {
    pub automation_pressure: f64,
    pub adaptability: f64,
    pub transferability: f64,
    pub economic_demand: f64,
    pub ai_augmentation: f64,
}

/// Equilibrium outputs for one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    /// Net directional displacement in [-0.20, 0.20].
    pub shift: f64,
    /// Baseline 1.0 perturbed by shift, clamped to [0.5, 1.5].
    pub center: f64,
    /// Resilience band bounds around the center.
    pub lower: f64,
    pub upper: f64,
    /// Instability score in [0, 2].
    pub tension: f64,
}

/// A table after feature engineering. `features[i]` belongs to `jobs[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineeredTable {
    pub table: JobTable,
    pub features: Vec<Features>,
}

/// A fully scored table: raw rows, engineered features, forces, and
/// equilibrium outputs, all index-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTable {
    pub table: JobTable,
    pub features: Vec<Features>,
    pub forces: Vec<Forces>,
    pub equilibrium: Vec<Equilibrium>,
}

/// Borrowed view of one scored row.
#[derive(Debug, Clone, Copy)]
pub struct ScoredRow<'a> {
    pub index: usize,
    pub job: &'a Job,
    pub features: &'a Features,
    pub forces: &'a Forces,
    pub equilibrium: &'a Equilibrium,
}

impl ScoredTable {
    pub fn len(&self) -> usize {
        self.table.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.jobs.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<ScoredRow<'_>> {
        Some(ScoredRow {
            index,
            job: self.table.jobs.get(index)?,
            features: self.features.get(index)?,
            forces: self.forces.get(index)?,
            equilibrium: self.equilibrium.get(index)?,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = ScoredRow<'_>> {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}
