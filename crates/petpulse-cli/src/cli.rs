//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PetPulse - Track your pet's moods and what they mean
#[derive(Parser)]
#[command(name = "petpulse")]
#[command(about = "Pet mood diary, trends, and personality insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "petpulse.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set PETPULSE_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (encryption, counts, plan)
    Status,

    /// Manage pets (list, add, update, delete)
    Pets {
        #[command(subcommand)]
        action: Option<PetsAction>,
    },

    /// Analyze a pet sound or video clip
    Analyze {
        /// Pet the recording belongs to
        #[arg(short, long)]
        pet: i64,

        /// Media file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Media kind (inferred from the file extension if not specified)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Browse the mood diary
    Diary {
        #[command(subcommand)]
        action: Option<DiaryAction>,
    },

    /// Show a month of dominant moods
    Calendar {
        /// Pet to show
        #[arg(short, long)]
        pet: i64,

        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Show the 8-week mood trend table (plus plan)
    Trends {
        /// Pet to show
        #[arg(short, long)]
        pet: i64,
    },

    /// Show mood of the week, personality summary, and active prompts
    Insights {
        /// Pet to show
        #[arg(short, long)]
        pet: i64,
    },

    /// Show the full personality profile (plus plan)
    Personality {
        /// Pet to show
        #[arg(short, long)]
        pet: i64,
    },

    /// Show plan and usage allowance
    Usage,

    /// Upgrade to the plus plan
    Upgrade,

    /// Recommend products for a pet's current mood
    Recommend {
        /// Pet to recommend for
        #[arg(short, long)]
        pet: i64,

        /// Mood to match (defaults to the mood of the week)
        #[arg(short, long)]
        mood: Option<String>,

        /// Maximum number of products
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Export the diary or a full backup
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },
}

#[derive(Subcommand)]
pub enum PetsAction {
    /// List pets
    List,

    /// Register a new pet
    Add {
        /// Pet name
        name: String,

        /// Species: dog or cat
        #[arg(short, long)]
        species: String,

        /// Breed
        #[arg(short, long)]
        breed: Option<String>,

        /// Age in years
        #[arg(short, long)]
        age: Option<u32>,
    },

    /// Update a pet's details
    Update {
        /// Pet ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New breed
        #[arg(long)]
        breed: Option<String>,

        /// New age in years
        #[arg(long)]
        age: Option<u32>,
    },

    /// Delete a pet and its diary entries
    Delete {
        /// Pet ID
        id: i64,

        /// Skip the confirmation when diary entries exist
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DiaryAction {
    /// List diary entries
    List {
        /// Restrict to one pet
        #[arg(short, long)]
        pet: Option<i64>,

        /// Maximum entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete a diary entry
    Delete {
        /// Analysis ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export the diary as CSV (plus plan)
    Diary {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Restrict to one pet
        #[arg(long)]
        pet: Option<i64>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
    },

    /// Export everything as a JSON backup
    Full {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}
