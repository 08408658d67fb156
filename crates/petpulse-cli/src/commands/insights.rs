//! Insight view command implementations (calendar, trends, insights, personality)

use anyhow::Result;
use chrono::{Datelike, Utc};
use petpulse_core::calendar::{
    build_mood_calendar, build_mood_trends, mood_of_the_week, TREND_WEEKS,
};
use petpulse_core::db::Database;
use petpulse_core::models::Pet;
use petpulse_core::subscription::{Feature, UsageLedger};
use petpulse_core::upsell;

use super::analyze::{print_triggers, refresh_personality, RECENT_MOOD_WINDOW};

fn get_pet(db: &Database, pet_id: i64) -> Result<Pet> {
    db.get_pet(pet_id)?
        .ok_or_else(|| anyhow::anyhow!("No pet with id {}", pet_id))
}

/// Show a month of dominant moods
pub fn cmd_calendar(db: &Database, pet_id: i64, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let pet = get_pet(db, pet_id)?;
    let today = Utc::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        anyhow::bail!("Month must be 1-12, got {}", month);
    }

    let analyses = db.list_analyses_for_pet(pet_id)?;
    let calendar = build_mood_calendar(&analyses, year, month);

    println!();
    println!("📅 {}: {}/{}", pet.name, month, year);
    println!("   ─────────────────────────────────────────────────────────────");

    let mut recorded_days = 0;
    for day in &calendar {
        match &day.mood {
            Some(mood) => {
                recorded_days += 1;
                println!(
                    "   {:>2}  {:14} ({} {})",
                    day.date.day(),
                    mood,
                    day.analyses.len(),
                    if day.analyses.len() == 1 {
                        "entry"
                    } else {
                        "entries"
                    }
                );
            }
            None => println!("   {:>2}  ·", day.date.day()),
        }
    }

    println!();
    println!(
        "   {} of {} days have recordings",
        recorded_days,
        calendar.len()
    );

    Ok(())
}

/// Show the 8-week trend table (plus plan)
pub fn cmd_trends(db: &Database, pet_id: i64) -> Result<()> {
    let now = Utc::now();
    let ledger = UsageLedger::new(db);
    if !ledger.can_use(Feature::MoodTrends, now)? {
        anyhow::bail!(
            "Mood trends are a PetPulse Plus feature. Run 'petpulse upgrade' to unlock them."
        );
    }

    let pet = get_pet(db, pet_id)?;
    let analyses = db.list_analyses_for_pet(pet_id)?;
    let trends = build_mood_trends(&analyses, now.date_naive());

    println!();
    println!("📈 {}: last {} weeks", pet.name, TREND_WEEKS);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>6} │ {:>5} │ {:>7} │ {:>7} │ {:>7} │ {:>7} │ {:>7}",
        "Week", "Happy", "Excited", "Anxious", "Playful", "Content", "Curious"
    );
    println!("   ───────┼───────┼─────────┼─────────┼─────────┼─────────┼────────");

    for point in &trends {
        println!(
            "   {:>6} │ {:>5} │ {:>7} │ {:>7} │ {:>7} │ {:>7} │ {:>7}",
            point.week,
            point.happy,
            point.excited,
            point.anxious,
            point.playful,
            point.content,
            point.curious
        );
    }

    Ok(())
}

/// Show mood of the week, personality summary, and active prompts
pub fn cmd_insights(db: &Database, pet_id: i64) -> Result<()> {
    let now = Utc::now();
    let pet = get_pet(db, pet_id)?;

    // The insights view is a recompute point, same as recording an analysis
    refresh_personality(db, pet_id)?;
    let pet_after = get_pet(db, pet_id).unwrap_or(pet);

    let analyses = db.list_analyses_for_pet(pet_id)?;
    let week = mood_of_the_week(&analyses, now);

    println!();
    println!("🔍 Insights for {}", pet_after.name);
    println!("   ─────────────────────────────────────────────────────────────");
    if week.count > 0 {
        println!(
            "   Mood of the week: {} ({} recordings)",
            week.mood, week.count
        );
    } else {
        println!("   Mood of the week: no recordings in the last 7 days");
    }

    let ledger = UsageLedger::new(db);
    let state = ledger.read(now)?.state;

    match (&pet_after.personality, state.can_use(Feature::Personality)) {
        (Some(profile), true) => {
            println!(
                "   Personality: {} {} ({} analyses)",
                profile.icon, profile.archetype, profile.analysis_count
            );
        }
        (Some(_), false) => {
            println!("   Personality: computed 🔒 (see it with PetPulse Plus)");
        }
        (None, _) => {
            println!(
                "   Personality: not yet known ({} of {} analyses)",
                analyses.len(),
                petpulse_core::personality::MIN_ANALYSES_FOR_PROFILE
            );
        }
    }

    // Trigger evaluation runs on every insights render, independent of the
    // analyze pipeline
    let recent = db.recent_mood_labels(RECENT_MOOD_WINDOW)?;
    let triggers = upsell::evaluate_triggers(&state, db.count_analyses()?, &recent);
    print_triggers(&triggers);

    Ok(())
}

/// Show the full personality profile (plus plan)
pub fn cmd_personality(db: &Database, pet_id: i64) -> Result<()> {
    let now = Utc::now();
    let ledger = UsageLedger::new(db);
    if !ledger.can_use(Feature::Personality, now)? {
        anyhow::bail!(
            "Personality profiles are a PetPulse Plus feature. Run 'petpulse upgrade' to unlock them."
        );
    }

    refresh_personality(db, pet_id)?;
    let pet = get_pet(db, pet_id)?;

    let Some(profile) = pet.personality else {
        let count = db.count_analyses_for_pet(pet_id)?;
        anyhow::bail!(
            "{} needs {} analyses for a profile ({} so far).",
            pet.name,
            petpulse_core::personality::MIN_ANALYSES_FOR_PROFILE,
            count
        );
    };

    println!();
    println!("{} {} is a {}", profile.icon, pet.name, profile.archetype);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", profile.description);
    println!("   Traits: {}", profile.traits.join(", "));
    println!();
    println!("   Mood mix over {} analyses:", profile.analysis_count);
    for (mood, pct) in &profile.mood_frequency {
        println!("   {:16} {:>3}%", mood, pct);
    }
    println!();
    println!(
        "   Last updated {}",
        profile.last_updated.format("%Y-%m-%d %H:%M")
    );

    Ok(())
}
