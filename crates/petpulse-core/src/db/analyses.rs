//! Mood analysis operations
//!
//! Analyses are immutable once recorded: there is insert, read, and delete,
//! but no update.

use rusqlite::params;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Analysis, MediaKind, MoodReading, NewAnalysis, Species};

impl Database {
    /// Record a new analysis, returning its id
    ///
    /// The referenced pet must exist; the foreign key surfaces violations as
    /// a database error rather than silently accepting orphan rows.
    pub fn insert_analysis(&self, analysis: &NewAnalysis) -> Result<i64> {
        if !(0.0..=1.0).contains(&analysis.confidence)
            || !(0.0..=1.0).contains(&analysis.mood.confidence)
        {
            return Err(Error::InvalidData(format!(
                "Confidence out of range for analysis of '{}'",
                analysis.file_name
            )));
        }

        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO analyses (
                pet_id, file_name, media_kind, detected_species, confidence,
                mood_primary, mood_secondary, mood_confidence,
                description, suggestion, recorded_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                analysis.pet_id,
                analysis.file_name,
                analysis.media_kind.as_str(),
                analysis.detected_species.as_str(),
                analysis.confidence,
                analysis.mood.primary,
                analysis.mood.secondary,
                analysis.mood.confidence,
                analysis.description,
                analysis.suggestion,
                format_datetime(analysis.recorded_at),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all analyses, oldest first
    pub fn list_analyses(&self) -> Result<Vec<Analysis>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY recorded_at, id",
            SELECT_ANALYSES
        ))?;
        let analyses = stmt
            .query_map([], row_to_analysis)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(analyses)
    }

    /// List one pet's analyses, oldest first
    pub fn list_analyses_for_pet(&self, pet_id: i64) -> Result<Vec<Analysis>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE pet_id = ? ORDER BY recorded_at, id",
            SELECT_ANALYSES
        ))?;
        let analyses = stmt
            .query_map(params![pet_id], row_to_analysis)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(analyses)
    }

    /// Total number of recorded analyses
    pub fn count_analyses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of analyses recorded for one pet
    pub fn count_analyses_for_pet(&self, pet_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM analyses WHERE pet_id = ?",
            params![pet_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Most recent primary mood labels across all pets, newest first
    pub fn recent_mood_labels(&self, limit: usize) -> Result<Vec<String>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT mood_primary FROM analyses ORDER BY recorded_at DESC, id DESC LIMIT ?",
        )?;
        let labels = stmt
            .query_map(params![limit as i64], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(labels)
    }

    /// Delete one analysis
    pub fn delete_analysis(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM analyses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Analysis {}", id)));
        }
        Ok(())
    }
}

const SELECT_ANALYSES: &str = r#"
    SELECT id, pet_id, file_name, media_kind, detected_species, confidence,
           mood_primary, mood_secondary, mood_confidence,
           description, suggestion, recorded_at, created_at
    FROM analyses
"#;

fn row_to_analysis(row: &rusqlite::Row) -> rusqlite::Result<Analysis> {
    let media_kind_str: String = row.get(3)?;
    let species_str: String = row.get(4)?;
    let recorded_str: String = row.get(11)?;
    let created_str: String = row.get(12)?;

    Ok(Analysis {
        id: row.get(0)?,
        pet_id: row.get(1)?,
        file_name: row.get(2)?,
        media_kind: media_kind_str.parse().unwrap_or(MediaKind::Audio),
        detected_species: species_str.parse().unwrap_or(Species::Dog),
        confidence: row.get(5)?,
        mood: MoodReading {
            primary: row.get(6)?,
            secondary: row.get(7)?,
            confidence: row.get(8)?,
        },
        description: row.get(9)?,
        suggestion: row.get(10)?,
        recorded_at: parse_datetime(&recorded_str),
        created_at: parse_datetime(&created_str),
    })
}
