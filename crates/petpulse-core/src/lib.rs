//! PetPulse Core Library
//!
//! Shared functionality for the PetPulse pet mood tracker:
//! - Database access and migrations
//! - Mood calendar, trend, and mood-of-the-week aggregation
//! - Personality classification from long-run mood frequency
//! - Usage metering and feature gating (free vs. plus plans)
//! - Upsell trigger evaluation
//! - Simulated mood analyzer (stand-in for a real inference backend)
//! - Product recommendations
//! - Diary CSV export and full JSON backups

pub mod analyzer;
pub mod calendar;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod personality;
pub mod recommend;
pub mod subscription;
pub mod upsell;

pub use analyzer::{analyze_media, species_hint, MoodAssessment};
pub use calendar::{
    build_mood_calendar, build_mood_trends, mood_of_the_week, MoodCalendarDay, MoodOfWeek,
    MoodTrendPoint,
};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{BackupMetadata, DiaryExportOptions, FullBackup};
pub use personality::{
    analyze_personality, classify, compute_frequencies, should_update_personality, MoodFrequency,
    PersonalityType,
};
pub use recommend::{recommend_products, Product, ProductCategory};
pub use subscription::{Feature, LedgerRead, LedgerState, Plan, UsageLedger};
pub use upsell::{evaluate_triggers, TriggerKind, UpsellTrigger};
