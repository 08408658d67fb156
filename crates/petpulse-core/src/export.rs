//! Export functionality for the mood diary and full backups
//!
//! Supports:
//! - Diary CSV export with filtering (pet, date range)
//! - Full JSON backup of pets, analyses, and the usage ledger

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::Result;
use crate::models::{Analysis, Pet};
use crate::subscription::LedgerState;

/// Options for diary export
#[derive(Debug, Clone, Default)]
pub struct DiaryExportOptions {
    /// Restrict to one pet
    pub pet_id: Option<i64>,
    /// Start date filter (inclusive)
    pub from: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub to: Option<NaiveDate>,
}

/// Backup metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Backup format version
    pub version: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Total number of records in backup
    pub total_records: i64,
}

/// Backup format version written by this build
pub const BACKUP_VERSION: u32 = 1;

/// Full database backup structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullBackup {
    pub metadata: BackupMetadata,
    pub pets: Vec<Pet>,
    pub analyses: Vec<Analysis>,
    pub ledger: Option<LedgerState>,
}

impl Database {
    /// Export the mood diary to CSV format
    pub fn export_diary_csv(&self, opts: &DiaryExportOptions) -> Result<String> {
        let analyses = match opts.pet_id {
            Some(pet_id) => self.list_analyses_for_pet(pet_id)?,
            None => self.list_analyses()?,
        };
        let pets = self.list_pets()?;
        let pet_name = |pet_id: i64| {
            pets.iter()
                .find(|p| p.id == pet_id)
                .map(|p| p.name.as_str())
                .unwrap_or("")
        };

        let mut csv = String::from(
            "recorded_at,pet,species,media,file,mood,secondary,confidence,description,suggestion\n",
        );

        for analysis in &analyses {
            let date = analysis.recorded_at.date_naive();
            if let Some(from) = opts.from {
                if date < from {
                    continue;
                }
            }
            if let Some(to) = opts.to {
                if date > to {
                    continue;
                }
            }

            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{:.2},{},{}\n",
                analysis.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                escape_csv_field(pet_name(analysis.pet_id)),
                analysis.detected_species,
                analysis.media_kind,
                escape_csv_field(&analysis.file_name),
                escape_csv_field(&analysis.mood.primary),
                escape_csv_field(analysis.mood.secondary.as_deref().unwrap_or("")),
                analysis.mood.confidence,
                escape_csv_field(&analysis.description),
                escape_csv_field(&analysis.suggestion),
            ));
        }

        Ok(csv)
    }

    /// Export the full database as a versioned JSON-serializable backup
    pub fn export_full_backup(&self, now: DateTime<Utc>) -> Result<FullBackup> {
        let pets = self.list_pets()?;
        let analyses = self.list_analyses()?;
        let ledger = self.load_ledger()?;

        let total_records =
            pets.len() as i64 + analyses.len() as i64 + if ledger.is_some() { 1 } else { 0 };

        Ok(FullBackup {
            metadata: BackupMetadata {
                version: BACKUP_VERSION,
                created_at: now,
                total_records,
            },
            pets,
            analyses,
            ledger,
        })
    }
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaKind, MoodReading, NewAnalysis, NewPet, Species};
    use chrono::TimeZone;

    fn seed(db: &Database) -> i64 {
        let pet_id = db
            .add_pet(&NewPet {
                name: "Biscuit".to_string(),
                species: Species::Dog,
                breed: None,
                age: None,
                avatar: None,
            })
            .unwrap();

        for (day, mood) in [(1, "Happy"), (2, "Anxious"), (3, "Playful")] {
            db.insert_analysis(&NewAnalysis {
                pet_id,
                file_name: format!("day{}.mp3", day),
                media_kind: MediaKind::Audio,
                detected_species: Species::Dog,
                confidence: 0.9,
                mood: MoodReading {
                    primary: mood.to_string(),
                    secondary: None,
                    confidence: 0.85,
                },
                description: "calm, steady barking".to_string(),
                suggestion: "treat time".to_string(),
                recorded_at: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
            })
            .unwrap();
        }
        pet_id
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("simple"), "simple");
        assert_eq!(escape_csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv_field("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_export_diary_csv() {
        let db = Database::in_memory().unwrap();
        seed(&db);

        let csv = db.export_diary_csv(&DiaryExportOptions::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4, "header plus one row per analysis");
        assert!(lines[0].starts_with("recorded_at,pet,species,media,"));
        assert!(lines[1].contains("Biscuit"));
        assert!(lines[1].contains("Happy"));
        // Description contains a comma, so it must be quoted
        assert!(lines[1].contains("\"calm, steady barking\""));
    }

    #[test]
    fn test_export_diary_csv_date_filter() {
        let db = Database::in_memory().unwrap();
        seed(&db);

        let opts = DiaryExportOptions {
            pet_id: None,
            from: Some(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
        };
        let csv = db.export_diary_csv(&opts).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Anxious"));
    }

    #[test]
    fn test_export_full_backup_round_trip() {
        let db = Database::in_memory().unwrap();
        let pet_id = seed(&db);
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();

        let backup = db.export_full_backup(now).unwrap();
        assert_eq!(backup.metadata.version, BACKUP_VERSION);
        assert_eq!(backup.metadata.total_records, 4);
        assert_eq!(backup.pets.len(), 1);
        assert_eq!(backup.pets[0].id, pet_id);
        assert_eq!(backup.analyses.len(), 3);
        assert!(backup.ledger.is_none(), "ledger not yet initialized");

        // Serializes to JSON and back
        let json = serde_json::to_string(&backup).unwrap();
        let parsed: FullBackup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.analyses.len(), 3);
        assert_eq!(parsed.pets[0].name, "Biscuit");
    }
}
