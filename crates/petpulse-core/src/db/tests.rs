//! Database tests

use super::*;
use crate::models::*;
use chrono::{DateTime, Utc};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{LedgerState, Plan};
    use chrono::TimeZone;
    use rusqlite::params;

    fn new_pet(name: &str, species: Species) -> NewPet {
        NewPet {
            name: name.to_string(),
            species,
            breed: None,
            age: None,
            avatar: None,
        }
    }

    fn new_analysis(pet_id: i64, primary: &str, recorded_at: DateTime<Utc>) -> NewAnalysis {
        NewAnalysis {
            pet_id,
            file_name: "clip.mp3".to_string(),
            media_kind: MediaKind::Audio,
            detected_species: Species::Dog,
            confidence: 0.9,
            mood: MoodReading {
                primary: primary.to_string(),
                secondary: None,
                confidence: 0.85,
            },
            description: "desc".to_string(),
            suggestion: "sugg".to_string(),
            recorded_at,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let pets = db.list_pets().unwrap();
        assert!(pets.is_empty());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('pets') WHERE name IN ('id', 'name', 'species', 'breed', 'age', 'avatar', 'personality', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 8, "pets table should have 8 expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('analyses') WHERE name IN ('id', 'pet_id', 'mood_primary', 'mood_secondary', 'mood_confidence', 'recorded_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 6, "analyses table should have expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('usage_ledger') WHERE name IN ('id', 'plan', 'usage_count', 'last_reset_at', 'plan_started_at', 'plan_expires_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 6, "usage_ledger table should have 6 expected columns");
    }

    #[test]
    fn test_pet_crud() {
        let db = Database::in_memory().unwrap();

        let id = db.add_pet(&new_pet("Biscuit", Species::Dog)).unwrap();
        assert!(id > 0);

        let mut pet = db.get_pet(id).unwrap().unwrap();
        assert_eq!(pet.name, "Biscuit");
        assert_eq!(pet.species, Species::Dog);
        assert!(pet.personality.is_none());

        pet.breed = Some("Corgi".to_string());
        pet.age = Some(3);
        db.update_pet(&pet).unwrap();

        let reloaded = db.get_pet(id).unwrap().unwrap();
        assert_eq!(reloaded.breed.as_deref(), Some("Corgi"));
        assert_eq!(reloaded.age, Some(3));

        db.delete_pet(id).unwrap();
        assert!(db.get_pet(id).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_pet_is_not_found() {
        let db = Database::in_memory().unwrap();
        let pet = Pet {
            id: 999,
            name: "Ghost".to_string(),
            species: Species::Cat,
            breed: None,
            age: None,
            avatar: None,
            personality: None,
            created_at: at(2026, 1, 1, 0),
        };
        assert!(matches!(
            db.update_pet(&pet),
            Err(crate::error::Error::NotFound(_))
        ));
        assert!(matches!(
            db.delete_pet(999),
            Err(crate::error::Error::NotFound(_))
        ));
    }

    #[test]
    fn test_personality_round_trip() {
        let db = Database::in_memory().unwrap();
        let id = db.add_pet(&new_pet("Mochi", Species::Cat)).unwrap();

        let profile = PersonalityProfile {
            archetype: "Chill Introvert".to_string(),
            description: "Calm and contemplative".to_string(),
            traits: vec!["Calm".to_string(), "Observant".to_string()],
            icon: "\u{1F913}".to_string(),
            color: "mint".to_string(),
            last_updated: at(2026, 3, 1, 12),
            analysis_count: 7,
            mood_frequency: [("Content".to_string(), 57), ("Curious".to_string(), 43)]
                .into_iter()
                .collect(),
        };
        db.set_personality(id, &profile).unwrap();

        let stored = db.get_pet(id).unwrap().unwrap().personality.unwrap();
        assert_eq!(stored.archetype, "Chill Introvert");
        assert_eq!(stored.analysis_count, 7);
        assert_eq!(stored.mood_frequency.get("Content"), Some(&57));
        assert_eq!(stored.last_updated, at(2026, 3, 1, 12));
    }

    #[test]
    fn test_analyses_insert_list_and_count() {
        let db = Database::in_memory().unwrap();
        let pet_id = db.add_pet(&new_pet("Biscuit", Species::Dog)).unwrap();
        let other_id = db.add_pet(&new_pet("Mochi", Species::Cat)).unwrap();

        // Inserted out of chronological order on purpose
        db.insert_analysis(&new_analysis(pet_id, "Happy", at(2026, 3, 2, 9)))
            .unwrap();
        db.insert_analysis(&new_analysis(pet_id, "Anxious", at(2026, 3, 1, 9)))
            .unwrap();
        db.insert_analysis(&new_analysis(other_id, "Content", at(2026, 3, 3, 9)))
            .unwrap();

        let all = db.list_analyses().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].mood.primary, "Anxious", "oldest first");
        assert_eq!(all[2].mood.primary, "Content");

        let for_pet = db.list_analyses_for_pet(pet_id).unwrap();
        assert_eq!(for_pet.len(), 2);
        assert!(for_pet.iter().all(|a| a.pet_id == pet_id));

        assert_eq!(db.count_analyses().unwrap(), 3);
        assert_eq!(db.count_analyses_for_pet(pet_id).unwrap(), 2);
        assert_eq!(db.count_analyses_for_pet(other_id).unwrap(), 1);
    }

    #[test]
    fn test_analysis_round_trip_fields() {
        let db = Database::in_memory().unwrap();
        let pet_id = db.add_pet(&new_pet("Biscuit", Species::Dog)).unwrap();

        let mut analysis = new_analysis(pet_id, "Excited", at(2026, 3, 2, 9));
        analysis.mood.secondary = Some("Playful".to_string());
        analysis.media_kind = MediaKind::Video;
        db.insert_analysis(&analysis).unwrap();

        let stored = &db.list_analyses_for_pet(pet_id).unwrap()[0];
        assert_eq!(stored.mood.primary, "Excited");
        assert_eq!(stored.mood.secondary.as_deref(), Some("Playful"));
        assert_eq!(stored.media_kind, MediaKind::Video);
        assert_eq!(stored.recorded_at, at(2026, 3, 2, 9));
        assert!((stored.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_orphan_analysis_rejected() {
        let db = Database::in_memory().unwrap();
        let result = db.insert_analysis(&new_analysis(424242, "Happy", at(2026, 3, 1, 9)));
        assert!(result.is_err(), "foreign key must reject orphan analyses");
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let db = Database::in_memory().unwrap();
        let pet_id = db.add_pet(&new_pet("Biscuit", Species::Dog)).unwrap();

        let mut analysis = new_analysis(pet_id, "Happy", at(2026, 3, 1, 9));
        analysis.confidence = 1.4;
        assert!(matches!(
            db.insert_analysis(&analysis),
            Err(crate::error::Error::InvalidData(_))
        ));

        let mut analysis = new_analysis(pet_id, "Happy", at(2026, 3, 1, 9));
        analysis.mood.confidence = -0.1;
        assert!(db.insert_analysis(&analysis).is_err());
        assert_eq!(db.count_analyses().unwrap(), 0);
    }

    #[test]
    fn test_delete_pet_cascades_to_analyses() {
        let db = Database::in_memory().unwrap();
        let pet_id = db.add_pet(&new_pet("Biscuit", Species::Dog)).unwrap();
        let keeper_id = db.add_pet(&new_pet("Mochi", Species::Cat)).unwrap();

        db.insert_analysis(&new_analysis(pet_id, "Happy", at(2026, 3, 1, 9)))
            .unwrap();
        db.insert_analysis(&new_analysis(pet_id, "Anxious", at(2026, 3, 2, 9)))
            .unwrap();
        db.insert_analysis(&new_analysis(keeper_id, "Content", at(2026, 3, 3, 9)))
            .unwrap();

        db.delete_pet(pet_id).unwrap();

        assert_eq!(db.count_analyses_for_pet(pet_id).unwrap(), 0);
        assert_eq!(db.count_analyses().unwrap(), 1, "other pets keep theirs");

        // No orphan rows left behind
        let conn = db.conn().unwrap();
        let orphans: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM analyses WHERE pet_id = ?",
                params![pet_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_recent_mood_labels() {
        let db = Database::in_memory().unwrap();
        let pet_id = db.add_pet(&new_pet("Biscuit", Species::Dog)).unwrap();

        for (i, mood) in ["Happy", "Content", "Anxious", "Stressed", "Curious", "Playful"]
            .iter()
            .enumerate()
        {
            db.insert_analysis(&new_analysis(pet_id, mood, at(2026, 3, 1, i as u32)))
                .unwrap();
        }

        let labels = db.recent_mood_labels(5).unwrap();
        assert_eq!(
            labels,
            vec!["Playful", "Curious", "Stressed", "Anxious", "Content"],
            "newest first, limited"
        );
    }

    #[test]
    fn test_ledger_round_trip() {
        let db = Database::in_memory().unwrap();
        assert!(db.load_ledger().unwrap().is_none());

        let mut state = LedgerState::new_free(at(2026, 1, 1, 0));
        state.usage_count = 3;
        db.save_ledger(&state).unwrap();

        let loaded = db.load_ledger().unwrap().unwrap();
        assert_eq!(loaded.plan, Plan::Free);
        assert_eq!(loaded.usage_count, 3);
        assert_eq!(loaded.last_reset_at, at(2026, 1, 1, 0));
        assert!(loaded.plan_started_at.is_none());

        // Saving again replaces the single row
        state.plan = Plan::Plus;
        state.plan_started_at = Some(at(2026, 2, 1, 0));
        db.save_ledger(&state).unwrap();

        let loaded = db.load_ledger().unwrap().unwrap();
        assert_eq!(loaded.plan, Plan::Plus);
        assert_eq!(loaded.plan_started_at, Some(at(2026, 2, 1, 0)));

        let conn = db.conn().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM usage_ledger", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
