use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};

use super::ingest;
use super::types::ScoredTable;
use crate::scoring::{engineer, score};

const STORE_VERSION: u32 = 1;

#[derive(Deserialize)]
struct StoreFile {
    version: u32,
    table: ScoredTable,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    table: &'a ScoredTable,
}

/// Load the cached scored table, or build it from the raw CSV and cache
/// it. `fresh` bypasses the cache and recomputes.
pub fn load_processed(
    raw_csv: &Path,
    processed: &Path,
    fresh: bool,
    verbose: bool,
) -> Result<ScoredTable> {
    if !fresh && processed.exists() {
        if verbose {
            eprintln!("Loading processed table from {}", processed.display());
        }
        return load_store(processed);
    }

    let table = build_processed(raw_csv, verbose)?;
    save_store(processed, &table)?;
    if verbose {
        eprintln!("Saved processed table to {}", processed.display());
    }
    Ok(table)
}

/// Ingest the raw CSV and run the full pipeline over it.
pub fn build_processed(raw_csv: &Path, verbose: bool) -> Result<ScoredTable> {
    let raw = ingest::load_raw(raw_csv)?;
    if verbose {
        eprintln!(
            "Ingested {} rows ({} skill columns)",
            raw.len(),
            raw.skill_labels.len()
        );
    }
    Ok(score(&engineer(&raw)))
}

fn load_store(path: &Path) -> Result<ScoredTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open processed table at {}", path.display()))?;

    let store: StoreFile =
        serde_json::from_reader(file).context("Failed to load processed table")?;

    // Version check
    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported processed table version: {}", store.version);
    }

    Ok(store.table)
}

/// Save the scored table atomically so the cache is never left corrupted.
pub fn save_store(path: &Path, table: &ScoredTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer(
        &mut file,
        &StoreFileRef {
            version: STORE_VERSION,
            table,
        },
    )
    .context("Failed to serialize processed table")?;

    file.commit().context("Failed to save processed table")?;

    Ok(())
}

/// Export the full scored table as CSV, raw columns first, derived
/// columns appended. Row order is the table order.
pub fn export_csv(table: &ScoredTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory at {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;

    let mut header = vec![
        ingest::COL_JOB_TITLE.to_string(),
        ingest::COL_RISK_CATEGORY.to_string(),
        ingest::COL_EDU_LEVEL.to_string(),
        ingest::COL_AVG_SALARY.to_string(),
        ingest::COL_YEARS_EXP.to_string(),
        ingest::COL_AI_EXPOSURE.to_string(),
        ingest::COL_TECH_GROWTH.to_string(),
        ingest::COL_AUTOMATION_PROB.to_string(),
    ];
    header.extend(table.table.skill_labels.iter().cloned());
    header.extend(
        [
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
        ]
        .map(String::from),
    );
    writer.write_record(&header).context("Failed to write CSV header")?;

    for row in table.rows() {
        let mut record = vec![
            row.job.title.clone(),
            row.job.risk_category.clone().unwrap_or_default(),
            row.job.education_level.clone().unwrap_or_default(),
            opt_cell(row.job.avg_salary),
            opt_cell(row.job.years_experience),
            opt_cell(row.job.ai_exposure),
            opt_cell(row.job.tech_growth),
            opt_cell(row.job.automation_probability),
        ];
        record.extend(row.job.skills.iter().map(|v| opt_cell(*v)));
        record.extend([
            row.features.education_score.to_string(),
            opt_cell(row.features.skill_mean),
            opt_cell(row.features.skill_std),
            row.features.skill_breadth.to_string(),
            row.features.skill_balance.to_string(),
            row.features.augmentation_proxy.to_string(),
            row.forces.automation_pressure.to_string(),
            row.forces.adaptability.to_string(),
            row.forces.transferability.to_string(),
            row.forces.economic_demand.to_string(),
            row.forces.ai_augmentation.to_string(),
            row.equilibrium.shift.to_string(),
            row.equilibrium.center.to_string(),
            row.equilibrium.lower.to_string(),
            row.equilibrium.upper.to_string(),
            row.equilibrium.tension.to_string(),
        ]);
        writer.write_record(&record).context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush export file")?;
    Ok(())
}

fn opt_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn sample_scored() -> ScoredTable {
        let csv = "\
Job_Title,Average_Salary,Education_Level,AI_Exposure_Index,Automation_Probability_2030,Skill_1
Analyst,60000,Bachelor,0.5,0.4,0.7
Welder,40000,High School,0.2,0.8,0.3
";
        let raw = ingest::read_table(csv.as_bytes()).unwrap();
        score(&engineer(&raw))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("jobshift_test_store_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let table = sample_scored();
        save_store(&temp_path, &table).unwrap();
        let loaded = load_store(&temp_path).unwrap();

        assert_eq!(loaded.len(), table.len());
        assert_eq!(loaded.table.jobs[0].title, "Analyst");
        assert_eq!(loaded.forces, table.forces);
        assert_eq!(loaded.equilibrium, table.equilibrium);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("jobshift_test_store_version.json");
        std::fs::write(&temp_path, r#"{"version":99,"table":{"table":{"skill_labels":[],"jobs":[]},"features":[],"forces":[],"equilibrium":[]}}"#).unwrap();

        let err = load_store(&temp_path).unwrap_err();
        assert!(err.to_string().contains("version"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_processed_builds_when_cache_missing() {
        let raw_path = env::temp_dir().join("jobshift_test_raw.csv");
        let processed_path = env::temp_dir().join("jobshift_test_processed.json");
        let _ = std::fs::remove_file(&processed_path);

        std::fs::write(
            &raw_path,
            "Job_Title,AI_Exposure_Index,Automation_Probability_2030\nA,0.5,0.4\nB,0.2,0.8\n",
        )
        .unwrap();

        let table = load_processed(&raw_path, &processed_path, false, false).unwrap();
        assert_eq!(table.len(), 2);
        assert!(processed_path.exists());

        // Second call hits the cache and agrees with the build.
        let cached = load_processed(&raw_path, &processed_path, false, false).unwrap();
        assert_eq!(cached.forces, table.forces);

        let _ = std::fs::remove_file(&raw_path);
        let _ = std::fs::remove_file(&processed_path);
    }

    #[test]
    fn test_export_csv_writes_all_rows() {
        let out_path = env::temp_dir().join("jobshift_test_export.csv");
        let _ = std::fs::remove_file(&out_path);

        let table = sample_scored();
        export_csv(&table, &out_path).unwrap();

        let content = std::fs::read_to_string(&out_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 rows
        assert!(lines[0].contains("transition_tension"));
        assert!(lines[1].starts_with("Analyst"));

        let _ = std::fs::remove_file(&out_path);
    }
}
