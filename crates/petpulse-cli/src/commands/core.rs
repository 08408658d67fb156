//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status and counters

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use petpulse_core::db::Database;
use petpulse_core::subscription::UsageLedger;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_str().unwrap();
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    // Write the default free-plan metering row
    let ledger = UsageLedger::new(&db);
    let read = ledger.read(Utc::now()).context("Failed to seed ledger")?;
    println!(
        "   Plan: {} ({} analyses per month)",
        read.state.plan,
        read.state.remaining().unwrap_or(0)
    );

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Register a pet: petpulse pets add Biscuit --species dog");
    println!("  2. Analyze a clip: petpulse analyze --pet 1 --file bark.mp3");

    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    use petpulse_core::db::DB_KEY_ENV;
    use std::fs;

    println!();
    println!("📊 PetPulse Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    // Check encryption status
    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    // Try to open the database and show stats
    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                let pets = db.list_pets()?;
                let analyses = db.count_analyses()?;
                println!();
                println!("   Pets: {}", pets.len());
                println!("   Diary entries: {}", analyses);

                let ledger = UsageLedger::new(&db);
                let read = ledger.read(Utc::now())?;
                match read.state.remaining() {
                    Some(remaining) => println!(
                        "   Plan: {} ({} of {} analyses left)",
                        read.state.plan,
                        remaining,
                        petpulse_core::subscription::FREE_USAGE_LIMIT
                    ),
                    None => println!("   Plan: {} (unlimited)", read.state.plan),
                }
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
