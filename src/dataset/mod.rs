pub mod ingest;
pub mod store;
pub mod types;

pub use types::{
    EngineeredTable, Equilibrium, Features, Forces, Job, JobTable, ScoredRow, ScoredTable,
};

use anyhow::{bail, Result};

/// Resolve a row by index or by case-insensitive title substring (first
/// match wins). These lookups are the only user-visible failures at the
/// pipeline boundary; everything inside the pipeline degrades silently.
pub fn select_row(table: &JobTable, index: Option<usize>, title: Option<&str>) -> Result<usize> {
    if let Some(title) = title {
        let needle = title.to_lowercase();
        return match table
            .jobs
            .iter()
            .position(|j| j.title.to_lowercase().contains(&needle))
        {
            Some(i) => Ok(i),
            None => bail!("No job title matched: {}", title),
        };
    }

    let Some(index) = index else {
        bail!("Provide --index or --title");
    };
    if index >= table.len() {
        bail!("Index out of range: {} (table has {} rows)", index, table.len());
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> JobTable {
        let titles = ["Data Analyst", "Machine Learning Engineer", "Data Engineer"];
        JobTable {
            skill_labels: vec![],
            jobs: titles
                .iter()
                .map(|t| Job {
                    title: t.to_string(),
                    risk_category: None,
                    education_level: None,
                    avg_salary: None,
                    years_experience: None,
                    ai_exposure: None,
                    tech_growth: None,
                    automation_probability: None,
                    skills: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn test_select_by_index() {
        let table = sample_table();
        assert_eq!(select_row(&table, Some(2), None).unwrap(), 2);
    }

    #[test]
    fn test_select_by_index_out_of_range() {
        let table = sample_table();
        let err = select_row(&table, Some(3), None).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_select_by_title_substring() {
        let table = sample_table();
        // Case-insensitive, first match wins.
        assert_eq!(select_row(&table, None, Some("engineer")).unwrap(), 1);
    }

    #[test]
    fn test_title_takes_precedence_over_index() {
        let table = sample_table();
        assert_eq!(select_row(&table, Some(0), Some("Data Engineer")).unwrap(), 2);
    }

    #[test]
    fn test_select_no_match() {
        let table = sample_table();
        let err = select_row(&table, None, Some("Astronaut")).unwrap_err();
        assert!(err.to_string().contains("No job title matched"));
    }

    #[test]
    fn test_select_requires_a_selector() {
        let table = sample_table();
        assert!(select_row(&table, None, None).is_err());
    }
}
