//! Diary command implementations (list, delete)

use anyhow::Result;
use petpulse_core::db::Database;

use super::truncate;

/// List diary entries, newest first
pub fn cmd_diary_list(db: &Database, pet_id: Option<i64>, limit: usize) -> Result<()> {
    let mut analyses = match pet_id {
        Some(pet_id) => db.list_analyses_for_pet(pet_id)?,
        None => db.list_analyses()?,
    };
    analyses.reverse();
    analyses.truncate(limit);

    if analyses.is_empty() {
        println!("No diary entries yet. Record one with:");
        println!("  petpulse analyze --pet <id> --file <clip>");
        return Ok(());
    }

    let pets = db.list_pets()?;
    let pet_name = |pet_id: i64| {
        pets.iter()
            .find(|p| p.id == pet_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    };

    println!();
    println!("📖 Mood Diary");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:16} │ {:12} │ {:14} │ {}",
        "ID", "Recorded", "Pet", "Mood", "Clip"
    );
    println!("   ─────┼──────────────────┼──────────────┼────────────────┼──────────────");

    for analysis in &analyses {
        println!(
            "   {:>4} │ {:16} │ {:12} │ {:14} │ {}",
            analysis.id,
            analysis.recorded_at.format("%Y-%m-%d %H:%M"),
            truncate(pet_name(analysis.pet_id), 12),
            truncate(&analysis.mood.primary, 14),
            truncate(&analysis.file_name, 24),
        );
    }

    Ok(())
}

/// Delete one diary entry
pub fn cmd_diary_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_analysis(id)?;
    println!("✅ Deleted diary entry {}", id);
    Ok(())
}
