use crate::dataset::types::{EngineeredTable, Features, Job, JobTable};

/// Skills strictly above this count toward breadth.
const BREADTH_THRESHOLD: f64 = 0.35;

/// Fallback education score for unknown or missing labels.
const NEUTRAL_EDUCATION: f64 = 0.6;

/// Derive the engineered attributes for every row.
///
/// Pure and total: malformed or missing inputs degrade to neutral
/// defaults, never to an error. The input table is not modified.
pub fn engineer(table: &JobTable) -> EngineeredTable {
    let has_skill_columns = !table.skill_labels.is_empty();
    let features = table
        .jobs
        .iter()
        .map(|job| engineer_row(job, has_skill_columns))
        .collect();

    EngineeredTable {
        table: table.clone(),
        features,
    }
}

fn engineer_row(job: &Job, has_skill_columns: bool) -> Features {
    let (skill_mean, skill_std, skill_breadth, skill_balance) = if has_skill_columns {
        let present: Vec<f64> = job.skills.iter().flatten().copied().collect();

        let mean = if present.is_empty() {
            None
        } else {
            Some(present.iter().sum::<f64>() / present.len() as f64)
        };
        let std = population_std(&present);
        let breadth = present.iter().filter(|&&v| v > BREADTH_THRESHOLD).count() as f64;
        // Higher when skills are more evenly spread, not necessarily
        // higher in magnitude.
        let balance = (1.0 / (1.0 + std)).clamp(0.0, 1.0);

        (mean, Some(std), breadth, balance)
    } else {
        (None, None, 0.0, 0.5)
    };

    let exposure = job.ai_exposure.unwrap_or(0.0);
    let automation = job.automation_probability.unwrap_or(0.0);

    Features {
        education_score: education_score(job.education_level.as_deref()),
        skill_mean,
        skill_std,
        skill_breadth,
        skill_balance,
        // High exposure with low substitution risk reads as augmentation.
        augmentation_proxy: (exposure * (1.0 - automation)).clamp(0.0, 1.0),
    }
}

/// Map an education label to an ordinal score in [0, 1].
///
/// Fixed label set, matched exactly after trimming. Unknown labels fall
/// back to the neutral 0.6 instead of failing.
fn education_score(level: Option<&str>) -> f64 {
    match level.map(str::trim) {
        Some("High School") => 0.2,
        Some("Associate") => 0.4,
        Some("Bachelor") => 0.6,
        Some("Master") => 0.8,
        Some("PhD") | Some("Doctorate") => 1.0,
        Some(_) | None => NEUTRAL_EDUCATION,
    }
}

/// Population standard deviation over the present values. Fewer than two
/// values have no spread.
fn population_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job(skills: Vec<Option<f64>>) -> Job {
        Job {
            title: "Data Analyst".to_string(),
            risk_category: Some("Medium".to_string()),
            education_level: Some("Bachelor".to_string()),
            avg_salary: Some(60_000.0),
            years_experience: Some(5.0),
            ai_exposure: Some(0.5),
            tech_growth: Some(1.0),
            automation_probability: Some(0.4),
            skills,
        }
    }

    fn sample_table(skills: Vec<Option<f64>>) -> JobTable {
        let labels = (1..=skills.len())
            .map(|i| format!("Skill_{}", i))
            .collect();
        JobTable {
            skill_labels: labels,
            jobs: vec![sample_job(skills)],
        }
    }

    #[test]
    fn test_education_known_labels() {
        assert_eq!(education_score(Some("High School")), 0.2);
        assert_eq!(education_score(Some("Associate")), 0.4);
        assert_eq!(education_score(Some("Bachelor")), 0.6);
        assert_eq!(education_score(Some("Master")), 0.8);
        assert_eq!(education_score(Some("PhD")), 1.0);
        assert_eq!(education_score(Some("Doctorate")), 1.0);
    }

    #[test]
    fn test_education_trims_whitespace() {
        assert_eq!(education_score(Some("  Master ")), 0.8);
    }

    #[test]
    fn test_education_unknown_is_neutral() {
        assert_eq!(education_score(Some("Bootcamp")), 0.6);
        // Matching is case-sensitive after trimming.
        assert_eq!(education_score(Some("bachelor")), 0.6);
        assert_eq!(education_score(None), 0.6);
    }

    #[test]
    fn test_skill_aggregates() {
        let table = sample_table(vec![Some(0.2), Some(0.8)]);
        let f = engineer(&table).features[0];

        assert_eq!(f.skill_mean, Some(0.5));
        // Population std of {0.2, 0.8} is 0.3.
        assert!((f.skill_std.unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(f.skill_breadth, 1.0);
        assert!((f.skill_balance - 1.0 / 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_skill_missing_values_excluded() {
        let table = sample_table(vec![Some(0.4), None, None]);
        let f = engineer(&table).features[0];

        assert_eq!(f.skill_mean, Some(0.4));
        assert_eq!(f.skill_std, Some(0.0));
        assert_eq!(f.skill_breadth, 1.0);
        assert_eq!(f.skill_balance, 1.0);
    }

    #[test]
    fn test_row_with_no_skill_values() {
        let table = sample_table(vec![None, None]);
        let f = engineer(&table).features[0];

        assert_eq!(f.skill_mean, None);
        assert_eq!(f.skill_std, Some(0.0));
        assert_eq!(f.skill_breadth, 0.0);
        assert_eq!(f.skill_balance, 1.0);
    }

    #[test]
    fn test_no_skill_columns_neutral_defaults() {
        let mut table = sample_table(vec![]);
        table.skill_labels.clear();
        let f = engineer(&table).features[0];

        assert_eq!(f.skill_mean, None);
        assert_eq!(f.skill_std, None);
        assert_eq!(f.skill_breadth, 0.0);
        assert_eq!(f.skill_balance, 0.5);
    }

    #[test]
    fn test_breadth_is_strictly_above_threshold() {
        let table = sample_table(vec![Some(0.35), Some(0.36), Some(0.1)]);
        let f = engineer(&table).features[0];
        assert_eq!(f.skill_breadth, 1.0);
    }

    #[test]
    fn test_augmentation_proxy() {
        let mut table = sample_table(vec![]);
        table.jobs[0].ai_exposure = Some(0.8);
        table.jobs[0].automation_probability = Some(0.25);
        let f = engineer(&table).features[0];
        assert!((f.augmentation_proxy - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_augmentation_proxy_missing_inputs_default_to_zero() {
        let mut table = sample_table(vec![]);
        table.jobs[0].ai_exposure = None;
        table.jobs[0].automation_probability = Some(0.9);
        let f = engineer(&table).features[0];
        assert_eq!(f.augmentation_proxy, 0.0);
    }
}
