use super::rank::rank_to_unit;
use crate::dataset::types::{EngineeredTable, Equilibrium, Forces, Job, ScoredTable};

// Shift weights. Automation pressure is the only force that pulls the
// equilibrium down; the force itself stays positive-is-pressure.
const W_AUTOMATION: f64 = 0.45;
const W_ADAPTABILITY: f64 = 0.20;
const W_TRANSFERABILITY: f64 = 0.15;
const W_DEMAND: f64 = 0.10;
const W_AUGMENTATION: f64 = 0.10;

/// Maps the clamped composite into a readable shift range of +/-20%.
const SHIFT_SCALE: f64 = 0.20;

const BAND_BASE_WIDTH: f64 = 0.06;
const BAND_MAX_WIDTH: f64 = 0.25;

/// Remap a rank-to-unit output from [-1, 1] to [0, 1].
fn to_zero_one(x: f64) -> f64 {
    (x + 1.0) / 2.0
}

/// Score every row of an engineered table: five rank-relative forces plus
/// the equilibrium shift, center, resilience band, and tension.
///
/// Pure: returns a new table. Forces are relative to the rows of *this*
/// table, so any change to one row requires re-scoring the whole table.
/// Missing automation probability or exposure is treated as 0 for the
/// affected row.
pub fn score(engineered: &EngineeredTable) -> ScoredTable {
    let jobs = &engineered.table.jobs;
    let features = &engineered.features;
    let n = jobs.len();

    // Automation pressure: high automation probability and exposure rank
    // toward +1.
    let auto_raw: Vec<f64> = jobs
        .iter()
        .map(|j| {
            0.7 * j.automation_probability.unwrap_or(0.0) + 0.3 * j.ai_exposure.unwrap_or(0.0)
        })
        .collect();
    let automation = rank_to_unit(&auto_raw, true);

    // Adaptability: education plus an experience rank remapped to [0, 1].
    let years: Vec<f64> = jobs
        .iter()
        .map(|j| j.years_experience.unwrap_or(0.0))
        .collect();
    let years_rank = rank_to_unit(&years, true);
    let adapt_raw: Vec<f64> = features
        .iter()
        .zip(&years_rank)
        .map(|(f, yr)| 0.6 * f.education_score + 0.4 * to_zero_one(*yr))
        .collect();
    let adaptability = rank_to_unit(&adapt_raw, true);

    // Transferability: skill breadth rank plus balance.
    let breadth: Vec<f64> = features.iter().map(|f| f.skill_breadth).collect();
    let breadth_rank = rank_to_unit(&breadth, true);
    let transfer_raw: Vec<f64> = features
        .iter()
        .zip(&breadth_rank)
        .map(|(f, br)| 0.65 * to_zero_one(*br) + 0.35 * f.skill_balance)
        .collect();
    let transferability = rank_to_unit(&transfer_raw, true);

    // Economic demand: tech growth and salary as a demand/complexity
    // proxy. Missing salary is imputed with the table median so the row
    // ranks as typical rather than bottom.
    let tech: Vec<f64> = jobs.iter().map(|j| j.tech_growth.unwrap_or(1.0)).collect();
    let salary = imputed_salaries(jobs);
    let tech_rank = rank_to_unit(&tech, true);
    let salary_rank = rank_to_unit(&salary, true);
    let demand_raw: Vec<f64> = tech_rank
        .iter()
        .zip(&salary_rank)
        .map(|(t, s)| 0.65 * to_zero_one(*t) + 0.35 * to_zero_one(*s))
        .collect();
    let economic_demand = rank_to_unit(&demand_raw, true);

    // AI augmentation: the amplifier story, exposure without substitution.
    let aug_raw: Vec<f64> = features
        .iter()
        .map(|f| 0.8 * f.augmentation_proxy + 0.2 * f.skill_balance)
        .collect();
    let ai_augmentation = rank_to_unit(&aug_raw, true);

    let mut forces = Vec::with_capacity(n);
    let mut equilibrium = Vec::with_capacity(n);
    for i in 0..n {
        let f = Forces {
            automation_pressure: automation[i],
            adaptability: adaptability[i],
            transferability: transferability[i],
            economic_demand: economic_demand[i],
            ai_augmentation: ai_augmentation[i],
        };
        equilibrium.push(equilibrium_for(&f));
        forces.push(f);
    }

    ScoredTable {
        table: engineered.table.clone(),
        features: engineered.features.clone(),
        forces,
        equilibrium,
    }
}

fn imputed_salaries(jobs: &[Job]) -> Vec<f64> {
    let median = median(jobs.iter().filter_map(|j| j.avg_salary)).unwrap_or(0.0);
    jobs.iter()
        .map(|j| j.avg_salary.unwrap_or(median))
        .collect()
}

fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    Some(if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    })
}

fn equilibrium_for(f: &Forces) -> Equilibrium {
    let raw_shift = (-W_AUTOMATION * f.automation_pressure
        + W_ADAPTABILITY * f.adaptability
        + W_TRANSFERABILITY * f.transferability
        + W_DEMAND * f.economic_demand
        + W_AUGMENTATION * f.ai_augmentation)
        .clamp(-1.0, 1.0);

    let shift = SHIFT_SCALE * raw_shift;
    let center = (1.0 + shift).clamp(0.5, 1.5);

    // Tension reuses the clamped composite before the shift scaling: a
    // role pulled hard in one direction, exposed, and not very
    // transferable is unstable.
    let tension = (raw_shift.abs()
        + 0.35 * f.automation_pressure.abs()
        + 0.25 * (1.0 - to_zero_one(f.transferability)))
    .clamp(0.0, 2.0);

    let width = (BAND_BASE_WIDTH + 0.10 * (tension / 2.0) + 0.06 * f.automation_pressure.abs())
        .clamp(BAND_BASE_WIDTH, BAND_MAX_WIDTH);

    Equilibrium {
        shift,
        center,
        lower: (center * (1.0 - width)).clamp(0.3, 1.5),
        upper: (center * (1.0 + width)).clamp(0.3, 1.7),
        tension,
    }
}
