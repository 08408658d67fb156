//! Pet management command implementations

use anyhow::Result;
use petpulse_core::db::Database;
use petpulse_core::models::{NewPet, Species};

use super::truncate;

/// List all pets
pub fn cmd_pets_list(db: &Database) -> Result<()> {
    let pets = db.list_pets()?;

    if pets.is_empty() {
        println!("No pets found. Register one with:");
        println!("  petpulse pets add <name> --species dog|cat");
        return Ok(());
    }

    println!();
    println!("🐾 Pets");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:20} │ {:7} │ {:15} │ {}",
        "ID", "Name", "Species", "Breed", "Personality"
    );
    println!("   ─────┼──────────────────────┼─────────┼─────────────────┼──────────────");

    for pet in pets {
        let breed = pet.breed.as_deref().unwrap_or("-");
        let personality = pet
            .personality
            .as_ref()
            .map(|p| p.archetype.as_str())
            .unwrap_or("(not yet known)");
        println!(
            "   {:>4} │ {:20} │ {:7} │ {:15} │ {}",
            pet.id,
            truncate(&pet.name, 20),
            pet.species.as_str(),
            truncate(breed, 15),
            personality
        );
    }

    Ok(())
}

/// Register a new pet
pub fn cmd_pets_add(
    db: &Database,
    name: &str,
    species: &str,
    breed: Option<&str>,
    age: Option<u32>,
) -> Result<()> {
    let species: Species = species
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{} (valid species: dog, cat)", e))?;

    let pet = NewPet {
        name: name.to_string(),
        species,
        breed: breed.map(String::from),
        age,
        avatar: None,
    };
    let id = db.add_pet(&pet)?;

    println!("✅ Registered {} (id: {})", name, id);
    Ok(())
}

/// Update a pet's details
pub fn cmd_pets_update(
    db: &Database,
    id: i64,
    name: Option<&str>,
    breed: Option<&str>,
    age: Option<u32>,
) -> Result<()> {
    let mut pet = db
        .get_pet(id)?
        .ok_or_else(|| anyhow::anyhow!("No pet with id {}", id))?;

    if let Some(name) = name {
        pet.name = name.to_string();
    }
    if let Some(breed) = breed {
        pet.breed = Some(breed.to_string());
    }
    if let Some(age) = age {
        pet.age = Some(age);
    }

    db.update_pet(&pet)?;
    println!("✅ Updated {} (id: {})", pet.name, pet.id);
    Ok(())
}

/// Delete a pet and its diary entries
pub fn cmd_pets_delete(db: &Database, id: i64, force: bool) -> Result<()> {
    let pet = db
        .get_pet(id)?
        .ok_or_else(|| anyhow::anyhow!("No pet with id {}", id))?;

    let entry_count = db.count_analyses_for_pet(id)?;
    if entry_count > 0 && !force {
        anyhow::bail!(
            "{} has {} diary entries that will be deleted with them. \
            Re-run with --force to confirm.",
            pet.name,
            entry_count
        );
    }

    db.delete_pet(id)?;
    println!(
        "✅ Deleted {} and {} diary entries",
        pet.name, entry_count
    );
    Ok(())
}
