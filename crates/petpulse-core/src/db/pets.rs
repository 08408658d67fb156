//! Pet operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewPet, PersonalityProfile, Pet, Species};

impl Database {
    /// Register a new pet, returning its id
    pub fn add_pet(&self, pet: &NewPet) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO pets (name, species, breed, age, avatar)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                pet.name,
                pet.species.as_str(),
                pet.breed,
                pet.age,
                pet.avatar,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Update a pet's descriptive fields (personality is updated separately)
    pub fn update_pet(&self, pet: &Pet) -> Result<()> {
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE pets
            SET name = ?, species = ?, breed = ?, age = ?, avatar = ?
            WHERE id = ?
            "#,
            params![
                pet.name,
                pet.species.as_str(),
                pet.breed,
                pet.age,
                pet.avatar,
                pet.id,
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Pet {}", pet.id)));
        }
        Ok(())
    }

    /// Replace a pet's personality profile (stored as a JSON column)
    pub fn set_personality(&self, pet_id: i64, profile: &PersonalityProfile) -> Result<()> {
        let conn = self.conn()?;

        let json = serde_json::to_string(profile)?;
        let updated = conn.execute(
            "UPDATE pets SET personality = ? WHERE id = ?",
            params![json, pet_id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Pet {}", pet_id)));
        }
        info!(pet_id, archetype = %profile.archetype, "Personality updated");
        Ok(())
    }

    /// List all pets, oldest first
    pub fn list_pets(&self) -> Result<Vec<Pet>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, species, breed, age, avatar, personality, created_at
            FROM pets
            ORDER BY id
            "#,
        )?;

        let pets = stmt
            .query_map([], row_to_pet)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(pets)
    }

    /// Get one pet by id
    pub fn get_pet(&self, id: i64) -> Result<Option<Pet>> {
        let conn = self.conn()?;

        let pet = conn
            .query_row(
                r#"
                SELECT id, name, species, breed, age, avatar, personality, created_at
                FROM pets
                WHERE id = ?
                "#,
                params![id],
                row_to_pet,
            )
            .optional()?;

        Ok(pet)
    }

    /// Delete a pet and (via FK cascade) its analyses
    pub fn delete_pet(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM pets WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Pet {}", id)));
        }
        info!(pet_id = id, "Pet deleted (analyses cascade)");
        Ok(())
    }
}

fn row_to_pet(row: &rusqlite::Row) -> rusqlite::Result<Pet> {
    let species_str: String = row.get(2)?;
    let personality_json: Option<String> = row.get(6)?;
    let created_str: String = row.get(7)?;

    Ok(Pet {
        id: row.get(0)?,
        name: row.get(1)?,
        species: species_str.parse().unwrap_or(Species::Dog),
        breed: row.get(3)?,
        age: row.get(4)?,
        avatar: row.get(5)?,
        personality: personality_json.and_then(|s| serde_json::from_str(&s).ok()),
        created_at: parse_datetime(&created_str),
    })
}
