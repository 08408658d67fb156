//! Domain models for PetPulse

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pet species supported by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

impl std::str::FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            _ => Err(format!("Unknown species: {}", s)),
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of media a mood analysis was run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Infer the media kind from a file extension, if recognizable
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "mp3" | "wav" | "m4a" | "ogg" | "flac" => Some(Self::Audio),
            "mp4" | "mov" | "webm" | "avi" | "mkv" => Some(Self::Video),
            _ => None,
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked pet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age: Option<u32>,
    /// Avatar token for the presentation layer (emoji or asset key)
    pub avatar: Option<String>,
    /// Derived personality profile, replaced wholesale on recompute
    pub personality: Option<PersonalityProfile>,
    pub created_at: DateTime<Utc>,
}

/// A new pet to be registered (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub avatar: Option<String>,
}

/// Mood attributed to a single analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodReading {
    /// Dominant emotional category (e.g., "Happy")
    pub primary: String,
    /// Secondary category, when the analyzer reports one
    pub secondary: Option<String>,
    /// Analyzer confidence in the mood call, 0.0..=1.0
    pub confidence: f64,
}

/// One recorded mood-analysis event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub pet_id: i64,
    pub file_name: String,
    pub media_kind: MediaKind,
    pub detected_species: Species,
    /// Overall species-detection confidence, 0.0..=1.0
    pub confidence: f64,
    pub mood: MoodReading,
    pub description: String,
    pub suggestion: String,
    /// When the observation was made (drives all date bucketing)
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A new analysis to be recorded (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub pet_id: i64,
    pub file_name: String,
    pub media_kind: MediaKind,
    pub detected_species: Species,
    pub confidence: f64,
    pub mood: MoodReading,
    pub description: String,
    pub suggestion: String,
    pub recorded_at: DateTime<Utc>,
}

/// Derived long-run personality classification for a pet
///
/// Stored as a JSON column on the pet row. Never user-created and never
/// field-merged: recomputation replaces the whole profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Category name from the fixed personality table (e.g., "Playful Diva")
    pub archetype: String,
    pub description: String,
    pub traits: Vec<String>,
    pub icon: String,
    pub color: String,
    pub last_updated: DateTime<Utc>,
    /// Total analyses at the time this profile was computed
    pub analysis_count: i64,
    /// Mood label -> integer percent (0..=100) at computation time
    pub mood_frequency: BTreeMap<String, u32>,
}
