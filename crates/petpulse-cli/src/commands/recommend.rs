//! Product recommendation command implementation

use anyhow::Result;
use chrono::Utc;
use petpulse_core::calendar::mood_of_the_week;
use petpulse_core::db::Database;
use petpulse_core::recommend::recommend_products;

/// Recommend products for a pet's current mood
pub fn cmd_recommend(db: &Database, pet_id: i64, mood: Option<&str>, limit: usize) -> Result<()> {
    let pet = db
        .get_pet(pet_id)?
        .ok_or_else(|| anyhow::anyhow!("No pet with id {}", pet_id))?;

    // Default to the dominant mood of the trailing week
    let mood = match mood {
        Some(mood) => mood.to_string(),
        None => {
            let analyses = db.list_analyses_for_pet(pet_id)?;
            let week = mood_of_the_week(&analyses, Utc::now());
            if week.count == 0 {
                anyhow::bail!(
                    "No recordings for {} in the last 7 days. Pass --mood to pick one.",
                    pet.name
                );
            }
            week.mood
        }
    };

    let products = recommend_products(&mood, pet.personality.as_ref(), limit);

    if products.is_empty() {
        println!("No product matches for mood '{}'.", mood);
        return Ok(());
    }

    println!();
    println!("🛍️  Picks for {} (mood: {})", pet.name, mood);
    println!("   ─────────────────────────────────────────────────────────────");

    for product in products {
        println!(
            "   {} ({}) {} ★{:.1} ({} reviews)",
            product.name, product.category, product.price, product.rating, product.review_count
        );
        println!("      {}", product.description);
    }

    Ok(())
}
