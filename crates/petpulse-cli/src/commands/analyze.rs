//! Analyze command implementation
//!
//! This is the full event pipeline: gate on the usage allowance, run the
//! simulated analyzer, record the analysis, meter it, recompute the
//! personality when the gate allows, then surface any upsell prompts.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use petpulse_core::analyzer;
use petpulse_core::db::Database;
use petpulse_core::models::{MediaKind, NewAnalysis};
use petpulse_core::personality;
use petpulse_core::subscription::{Feature, Plan, UsageLedger};
use petpulse_core::upsell::{self, UpsellTrigger};

/// Size of the recent-mood window fed to trigger evaluation: the last five
/// stored labels plus the one just recorded
pub(crate) const RECENT_MOOD_WINDOW: usize = 6;

pub fn cmd_analyze(db: &Database, pet_id: i64, file: &Path, kind: Option<&str>) -> Result<()> {
    let now = Utc::now();
    let pet = db
        .get_pet(pet_id)?
        .ok_or_else(|| anyhow::anyhow!("No pet with id {}", pet_id))?;

    let ledger = UsageLedger::new(db);
    let state = ledger.read(now)?.state;

    if !state.can_use(Feature::Analysis) {
        println!("🚫 Free analyses used up for this month.");
        let triggers = upsell::evaluate_triggers(&state, db.count_analyses()?, &[]);
        print_triggers(&triggers);
        anyhow::bail!("Analysis allowance exhausted. Run 'petpulse upgrade' for unlimited access.");
    }

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", file.display()))?;

    let media_kind = match kind {
        Some(kind) => kind
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{} (valid kinds: audio, video)", e))?,
        None => MediaKind::from_file_name(file_name).ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot infer the media kind of '{}'. Pass --kind audio|video.",
                file_name
            )
        })?,
    };

    println!("🎧 Analyzing {} for {}...", file_name, pet.name);

    let mut rng = rand::thread_rng();
    let assessment = analyzer::analyze_media(file_name, &mut rng);
    tracing::debug!(
        mood = %assessment.mood.primary,
        species = %assessment.detected_species,
        confidence = assessment.confidence,
        "Analyzer result"
    );

    db.insert_analysis(&NewAnalysis {
        pet_id,
        file_name: file_name.to_string(),
        media_kind,
        detected_species: assessment.detected_species,
        confidence: assessment.confidence,
        mood: assessment.mood.clone(),
        description: assessment.description.clone(),
        suggestion: assessment.suggestion.clone(),
        recorded_at: now,
    })
    .context("Failed to record analysis")?;

    // Meter the consumption on the free plan only
    let state = if state.plan == Plan::Free {
        ledger.increment(now)?
    } else {
        state
    };

    println!();
    println!("🐾 Mood: {}", assessment.mood.primary);
    println!(
        "   Detected: {} ({:.0}% confident)",
        assessment.detected_species,
        assessment.confidence * 100.0
    );
    println!("   {}", assessment.description);
    println!("   💡 {}", assessment.suggestion);

    if assessment.detected_species != pet.species {
        println!(
            "   ⚠️  Detected a {} but {} is registered as a {}.",
            assessment.detected_species, pet.name, pet.species
        );
    }

    refresh_personality(db, pet_id)?;

    if let Some(remaining) = state.remaining() {
        println!();
        println!("   Free analyses left this month: {}", remaining);
    }

    // Evaluate prompts against the window ending with this analysis
    let recent = db.recent_mood_labels(RECENT_MOOD_WINDOW)?;
    let triggers = upsell::evaluate_triggers(&state, db.count_analyses()?, &recent);
    print_triggers(&triggers);

    Ok(())
}

/// Recompute the pet's personality when the throttle gate allows
pub(crate) fn refresh_personality(db: &Database, pet_id: i64) -> Result<()> {
    let pet = match db.get_pet(pet_id)? {
        Some(pet) => pet,
        None => return Ok(()),
    };

    let count = db.count_analyses_for_pet(pet_id)?;
    let due = match &pet.personality {
        None => count >= personality::MIN_ANALYSES_FOR_PROFILE,
        Some(profile) => personality::should_update_personality(count, profile.analysis_count),
    };
    if !due {
        return Ok(());
    }

    let analyses = db.list_analyses_for_pet(pet_id)?;
    if let Some(profile) = personality::analyze_personality(&analyses, Utc::now()) {
        db.set_personality(pet_id, &profile)?;
        println!();
        println!(
            "✨ {} now profiles as {} {}",
            pet.name, profile.icon, profile.archetype
        );
    }

    Ok(())
}

/// Print upsell prompts, most urgent first
pub(crate) fn print_triggers(triggers: &[UpsellTrigger]) {
    if triggers.is_empty() {
        return;
    }

    println!();
    for trigger in triggers {
        println!(
            "   📣 {} (upgrade with 'petpulse upgrade')",
            trigger.condition
        );
    }
}
