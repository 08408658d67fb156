//! PetPulse CLI - Pet mood diary and insights
//!
//! Usage:
//!   petpulse init                          Initialize database
//!   petpulse pets add Biscuit --species dog
//!   petpulse analyze --pet 1 --file bark.mp3
//!   petpulse insights --pet 1              Mood of the week and prompts

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Pets { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(PetsAction::List) => commands::cmd_pets_list(&db),
                Some(PetsAction::Add {
                    name,
                    species,
                    breed,
                    age,
                }) => commands::cmd_pets_add(&db, &name, &species, breed.as_deref(), age),
                Some(PetsAction::Update {
                    id,
                    name,
                    breed,
                    age,
                }) => commands::cmd_pets_update(&db, id, name.as_deref(), breed.as_deref(), age),
                Some(PetsAction::Delete { id, force }) => commands::cmd_pets_delete(&db, id, force),
            }
        }
        Commands::Analyze { pet, file, kind } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_analyze(&db, pet, &file, kind.as_deref())
        }
        Commands::Diary { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_diary_list(&db, None, 20),
                Some(DiaryAction::List { pet, limit }) => commands::cmd_diary_list(&db, pet, limit),
                Some(DiaryAction::Delete { id }) => commands::cmd_diary_delete(&db, id),
            }
        }
        Commands::Calendar { pet, year, month } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_calendar(&db, pet, year, month)
        }
        Commands::Trends { pet } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_trends(&db, pet)
        }
        Commands::Insights { pet } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_insights(&db, pet)
        }
        Commands::Personality { pet } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_personality(&db, pet)
        }
        Commands::Usage => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_usage(&db)
        }
        Commands::Upgrade => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_upgrade(&db)
        }
        Commands::Recommend { pet, mood, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_recommend(&db, pet, mood.as_deref(), limit)
        }
        Commands::Export { export_type } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match export_type {
                ExportType::Diary {
                    output,
                    pet,
                    from,
                    to,
                } => commands::cmd_export_diary(
                    &db,
                    output.as_deref(),
                    pet,
                    from.as_deref(),
                    to.as_deref(),
                ),
                ExportType::Full { output } => commands::cmd_export_full(&db, &output),
            }
        }
    }
}
