//! Plan command implementations (usage, upgrade)

use anyhow::Result;
use chrono::Utc;
use petpulse_core::db::Database;
use petpulse_core::subscription::{Plan, UsageLedger, FREE_USAGE_LIMIT, USAGE_RESET_DAYS};

/// Show plan and usage allowance
pub fn cmd_usage(db: &Database) -> Result<()> {
    let ledger = UsageLedger::new(db);
    let read = ledger.read(Utc::now())?;
    let state = &read.state;

    println!();
    println!("💳 Plan & Usage");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Plan: {}",
        match state.plan {
            Plan::Free => "Free",
            Plan::Plus => "PetPulse Plus",
        }
    );

    match state.remaining() {
        Some(remaining) => {
            println!(
                "   Analyses: {} used, {} of {} left",
                state.usage_count, remaining, FREE_USAGE_LIMIT
            );
            println!(
                "   Allowance resets every {} days (last reset {})",
                USAGE_RESET_DAYS,
                state.last_reset_at.format("%Y-%m-%d")
            );
            if read.was_reset {
                println!("   ♻️  Allowance reset just now");
            }
        }
        None => {
            println!("   Analyses: unlimited");
            if let Some(expires) = state.plan_expires_at {
                println!("   Plan term ends {}", expires.format("%Y-%m-%d"));
            }
        }
    }

    Ok(())
}

/// Upgrade to the plus plan
pub fn cmd_upgrade(db: &Database) -> Result<()> {
    let ledger = UsageLedger::new(db);
    let now = Utc::now();

    if ledger.read(now)?.state.plan == Plan::Plus {
        println!("Already on PetPulse Plus. 🎉");
        return Ok(());
    }

    let state = ledger.upgrade(now)?;

    println!("🎉 Welcome to PetPulse Plus!");
    println!("   Unlimited analyses, trends, personality profiles, and exports.");
    if let Some(expires) = state.plan_expires_at {
        println!("   Plan term ends {}", expires.format("%Y-%m-%d"));
    }

    Ok(())
}
