use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::types::{Job, JobTable};

// Column names expected in the source dataset. Any subset may be absent;
// missing columns degrade to missing values, never to errors.
pub const COL_JOB_TITLE: &str = "Job_Title";
pub const COL_AVG_SALARY: &str = "Average_Salary";
pub const COL_YEARS_EXP: &str = "Years_Experience";
pub const COL_EDU_LEVEL: &str = "Education_Level";
pub const COL_AI_EXPOSURE: &str = "AI_Exposure_Index";
pub const COL_TECH_GROWTH: &str = "Tech_Growth_Factor";
pub const COL_AUTOMATION_PROB: &str = "Automation_Probability_2030";
pub const COL_RISK_CATEGORY: &str = "Risk_Category";

// Skill columns (Skill_1..Skill_10).
pub const SKILL_PREFIX: &str = "Skill_";
pub const SKILL_MAX: usize = 10;

/// Read and clean the raw CSV dataset.
pub fn load_raw(path: &Path) -> Result<JobTable> {
    let file =
        File::open(path).with_context(|| format!("Raw data not found: {}", path.display()))?;
    read_table(file).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse a raw table from any reader. Header-driven: the schema is
/// whatever columns the file has.
pub fn read_table<R: Read>(reader: R) -> Result<JobTable> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers().context("Failed to read CSV headers")?.clone();

    let col = |name: &str| headers.iter().position(|h| h == name);

    let title_idx = col(COL_JOB_TITLE);
    let risk_idx = col(COL_RISK_CATEGORY);
    let edu_idx = col(COL_EDU_LEVEL);
    let salary_idx = col(COL_AVG_SALARY);
    let years_idx = col(COL_YEARS_EXP);
    let exposure_idx = col(COL_AI_EXPOSURE);
    let tech_idx = col(COL_TECH_GROWTH);
    let auto_idx = col(COL_AUTOMATION_PROB);

    let skill_cols: Vec<(String, usize)> = (1..=SKILL_MAX)
        .filter_map(|i| {
            let name = format!("{}{}", SKILL_PREFIX, i);
            col(&name).map(|idx| (name, idx))
        })
        .collect();

    let mut jobs = Vec::new();
    for record in csv.records() {
        let record = record.context("Failed to read CSV record")?;

        let job = Job {
            title: text_field(&record, title_idx).unwrap_or_default(),
            risk_category: text_field(&record, risk_idx),
            education_level: text_field(&record, edu_idx),
            avg_salary: numeric_field(&record, salary_idx),
            years_experience: numeric_field(&record, years_idx),
            ai_exposure: numeric_field(&record, exposure_idx),
            tech_growth: numeric_field(&record, tech_idx),
            automation_probability: numeric_field(&record, auto_idx),
            skills: skill_cols
                .iter()
                .map(|(_, idx)| numeric_field(&record, Some(*idx)))
                .collect(),
        };

        // Drop rows missing critical signals, but only for those of the
        // critical columns the file actually carries.
        if title_idx.is_some() && job.title.is_empty() {
            continue;
        }
        if auto_idx.is_some() && job.automation_probability.is_none() {
            continue;
        }
        if exposure_idx.is_some() && job.ai_exposure.is_none() {
            continue;
        }

        jobs.push(job);
    }

    Ok(JobTable {
        skill_labels: skill_cols.into_iter().map(|(name, _)| name).collect(),
        jobs,
    })
}

fn text_field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn numeric_field(record: &csv::StringRecord, idx: Option<usize>) -> Option<f64> {
    idx.and_then(|i| record.get(i)).and_then(coerce_numeric)
}

/// Lenient numeric coercion: anything that does not parse as a number
/// becomes missing. NaN is the missing marker internally, so a literal
/// "NaN" cell is missing too.
fn coerce_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_schema_row() {
        let csv = "\
Job_Title,Average_Salary,Years_Experience,Education_Level,AI_Exposure_Index,Tech_Growth_Factor,Automation_Probability_2030,Risk_Category,Skill_1,Skill_2
 Data Analyst ,60000,5,Bachelor,0.5,1.2,0.4,Medium,0.7,0.3
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.skill_labels, vec!["Skill_1", "Skill_2"]);

        let job = &table.jobs[0];
        assert_eq!(job.title, "Data Analyst");
        assert_eq!(job.avg_salary, Some(60_000.0));
        assert_eq!(job.automation_probability, Some(0.4));
        assert_eq!(job.skills, vec![Some(0.7), Some(0.3)]);
    }

    #[test]
    fn test_non_numeric_becomes_missing() {
        let csv = "\
Job_Title,Average_Salary,AI_Exposure_Index,Automation_Probability_2030
Welder,not-a-number,0.2,0.8
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.jobs[0].avg_salary, None);
    }

    #[test]
    fn test_nan_cell_is_missing() {
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric(" 1.5 "), Some(1.5));
    }

    #[test]
    fn test_missing_columns_tolerated() {
        let csv = "\
Job_Title,Skill_3
Librarian,0.9
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.skill_labels, vec!["Skill_3"]);

        let job = &table.jobs[0];
        assert_eq!(job.automation_probability, None);
        assert_eq!(job.ai_exposure, None);
        assert_eq!(job.avg_salary, None);
        assert_eq!(job.skills, vec![Some(0.9)]);
    }

    #[test]
    fn test_rows_missing_critical_signals_dropped() {
        let csv = "\
Job_Title,AI_Exposure_Index,Automation_Probability_2030
Kept,0.5,0.4
,0.5,0.4
No Automation,0.5,
No Exposure,,0.4
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.jobs[0].title, "Kept");
    }

    #[test]
    fn test_critical_drop_skipped_when_column_absent() {
        // No automation/exposure columns at all: nothing to drop on.
        let csv = "\
Job_Title,Average_Salary
Teacher,45000
Clerk,30000
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_skill_columns_partial_set() {
        let csv = "\
Job_Title,AI_Exposure_Index,Automation_Probability_2030,Skill_1,Skill_5,Skill_10
Pilot,0.3,0.2,0.9,oops,0.4
";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.skill_labels, vec!["Skill_1", "Skill_5", "Skill_10"]);
        assert_eq!(table.jobs[0].skills, vec![Some(0.9), None, Some(0.4)]);
    }
}
