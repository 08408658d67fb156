//! Export command implementations (diary CSV, full JSON backup)

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use petpulse_core::db::Database;
use petpulse_core::export::DiaryExportOptions;
use petpulse_core::subscription::{Feature, UsageLedger};

fn parse_date(s: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// Export the diary as CSV (plus plan)
pub fn cmd_export_diary(
    db: &Database,
    output: Option<&Path>,
    pet_id: Option<i64>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let ledger = UsageLedger::new(db);
    if !ledger.can_use(Feature::ReportExport, Utc::now())? {
        anyhow::bail!(
            "Diary export is a PetPulse Plus feature. Run 'petpulse upgrade' to unlock it."
        );
    }

    let opts = DiaryExportOptions {
        pet_id,
        from: from.map(|s| parse_date(s, "--from")).transpose()?,
        to: to.map(|s| parse_date(s, "--to")).transpose()?,
    };

    let csv = db.export_diary_csv(&opts)?;
    let rows = csv.lines().count().saturating_sub(1);

    match output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Exported {} diary entries to {}", rows, path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}

/// Export everything as a JSON backup
pub fn cmd_export_full(db: &Database, output: &Path) -> Result<()> {
    let backup = db.export_full_backup(Utc::now())?;
    let json = serde_json::to_string_pretty(&backup)?;

    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✅ Exported {} records to {}",
        backup.metadata.total_records,
        output.display()
    );
    Ok(())
}
