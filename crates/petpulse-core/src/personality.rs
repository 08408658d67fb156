//! Personality classification from long-run mood frequency
//!
//! The classifier is an ordered rule table: each personality type carries a
//! predicate over the mood-frequency percentages, rules are evaluated in
//! declared order, and the first match wins. The order is load-bearing -
//! several predicates can hold for the same distribution, and the earliest
//! declared type is the one that sticks. The final entry doubles as the
//! fallback when nothing matches.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{Analysis, PersonalityProfile};

/// Minimum analyses before a profile can be computed
pub const MIN_ANALYSES_FOR_PROFILE: i64 = 5;

/// New analyses required between recomputations
pub const RECOMPUTE_EVERY: i64 = 5;

/// Mood label -> integer percent of total analyses
///
/// Percentages are rounded independently per label, so the sum may drift a
/// point or two from 100. Labels with zero occurrences are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodFrequency(BTreeMap<String, u32>);

impl MoodFrequency {
    pub fn new(percentages: BTreeMap<String, u32>) -> Self {
        Self(percentages)
    }

    /// Percentage for a label, 0 when absent
    pub fn pct(&self, label: &str) -> u32 {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(label, pct)| (label.as_str(), *pct))
    }

    pub fn into_map(self) -> BTreeMap<String, u32> {
        self.0
    }
}

/// One entry in the personality rule table
#[derive(Debug, Clone, Copy)]
pub struct PersonalityType {
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
    pub icon: &'static str,
    pub color: &'static str,
    pub matches: fn(&MoodFrequency) -> bool,
}

/// The personality rule table, in evaluation order
pub const PERSONALITY_TYPES: &[PersonalityType] = &[
    PersonalityType {
        name: "Playful Diva",
        description: "High energy and loves being the center of attention! \
                      Always ready for fun and games.",
        traits: &["Energetic", "Attention-seeking", "Social", "Dramatic"],
        icon: "\u{1F451}",
        color: "coral",
        matches: |f| f.pct("Excited") + f.pct("Playful") + f.pct("Attention-seeking") > 60,
    },
    PersonalityType {
        name: "Chill Introvert",
        description: "Calm and contemplative, prefers quiet moments and gentle interactions.",
        traits: &["Calm", "Observant", "Independent", "Thoughtful"],
        icon: "\u{1F913}",
        color: "mint",
        matches: |f| f.pct("Content") + f.pct("Curious") > 50 && f.pct("Excited") < 20,
    },
    PersonalityType {
        name: "Gentle Giant",
        description: "Big heart with a soft soul. Sensitive to changes but incredibly loving.",
        traits: &["Sensitive", "Loving", "Protective", "Gentle"],
        icon: "\u{1F49D}",
        color: "lavender",
        matches: |f| f.pct("Anxious") > 25 && f.pct("Happy") + f.pct("Content") > 40,
    },
    PersonalityType {
        name: "Adventure Seeker",
        description: "Always ready for the next big adventure! \
                      Curious about everything around them.",
        traits: &["Adventurous", "Curious", "Bold", "Explorer"],
        icon: "\u{1F5FA}\u{FE0F}",
        color: "yellow",
        matches: |f| f.pct("Curious") + f.pct("Excited") > 55 && f.pct("Anxious") < 15,
    },
    PersonalityType {
        name: "Foodie Friend",
        description: "Life revolves around meal times! Food is love, and love is food.",
        traits: &["Food-motivated", "Routine-loving", "Predictable", "Content"],
        icon: "\u{1F37D}\u{FE0F}",
        color: "orange",
        matches: |f| f.pct("Hungry") > 30,
    },
    PersonalityType {
        name: "Anxious Angel",
        description: "Needs extra love and reassurance. Thrives with routine and gentle care.",
        traits: &["Sensitive", "Needs-reassurance", "Loyal", "Cautious"],
        icon: "\u{1F607}",
        color: "blue",
        matches: |f| f.pct("Anxious") + f.pct("Stressed") > 40,
    },
    // Last entry doubles as the fallback when no rule matches
    PersonalityType {
        name: "Happy-Go-Lucky",
        description: "Pure sunshine in pet form! Spreads joy wherever they go.",
        traits: &["Optimistic", "Joyful", "Friendly", "Easygoing"],
        icon: "\u{2600}\u{FE0F}",
        color: "yellow",
        matches: |f| f.pct("Happy") > 50 && f.pct("Anxious") < 10,
    },
];

/// Compute per-label frequency percentages from an analysis history
///
/// percent = round(100 * count / total), rounded independently per label.
pub fn compute_frequencies(analyses: &[Analysis]) -> MoodFrequency {
    let total = analyses.len();
    if total == 0 {
        return MoodFrequency::default();
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for analysis in analyses {
        *counts.entry(analysis.mood.primary.clone()).or_insert(0) += 1;
    }

    let percentages = counts
        .into_iter()
        .map(|(label, count)| {
            let pct = (count as f64 / total as f64 * 100.0).round() as u32;
            (label, pct)
        })
        .collect();

    MoodFrequency::new(percentages)
}

/// Classify a frequency distribution into a personality type
///
/// First matching rule wins; the table's final entry is returned when
/// nothing matches. Deterministic for a given distribution.
pub fn classify(frequencies: &MoodFrequency) -> &'static PersonalityType {
    PERSONALITY_TYPES
        .iter()
        .find(|t| (t.matches)(frequencies))
        .unwrap_or(&PERSONALITY_TYPES[PERSONALITY_TYPES.len() - 1])
}

/// Recompute gate: enough history, and enough new analyses since last time
///
/// True iff `current_count >= 5` and at least 5 analyses were added since
/// the profile was computed. False when the count decreased.
pub fn should_update_personality(current_count: i64, last_count: i64) -> bool {
    current_count >= MIN_ANALYSES_FOR_PROFILE && current_count - last_count >= RECOMPUTE_EVERY
}

/// Build a full replacement profile from an analysis history
///
/// Returns `None` below the minimum history size. The result carries the
/// frequencies and the analysis count it was computed from, so the gate can
/// throttle the next recomputation.
pub fn analyze_personality(analyses: &[Analysis], now: DateTime<Utc>) -> Option<PersonalityProfile> {
    if (analyses.len() as i64) < MIN_ANALYSES_FOR_PROFILE {
        return None;
    }

    let frequencies = compute_frequencies(analyses);
    let personality = classify(&frequencies);

    Some(PersonalityProfile {
        archetype: personality.name.to_string(),
        description: personality.description.to_string(),
        traits: personality.traits.iter().map(|t| t.to_string()).collect(),
        icon: personality.icon.to_string(),
        color: personality.color.to_string(),
        last_updated: now,
        analysis_count: analyses.len() as i64,
        mood_frequency: frequencies.into_map(),
    })
}
