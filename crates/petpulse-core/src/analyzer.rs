//! Simulated mood analyzer
//!
//! Stands in for a real audio/video inference backend: picks a species from
//! file-name hints (or a coin flip) and a mood from per-species template
//! tables. The RNG is injected so tests can seed it; given the same RNG
//! state and file name the outcome is fully determined.

use rand::Rng;

use crate::models::{MoodReading, Species};

/// One canned analyzer outcome
#[derive(Debug, Clone, Copy)]
pub struct MoodTemplate {
    pub primary: &'static str,
    pub confidence: f64,
    pub description: &'static str,
    pub suggestion: &'static str,
}

/// Dog mood templates
pub const DOG_MOODS: &[MoodTemplate] = &[
    MoodTemplate {
        primary: "Happy",
        confidence: 0.92,
        description: "Your dog is feeling joyful and content! Their tail wagging and \
                      excited sounds indicate pure happiness.",
        suggestion: "Keep up the great energy! Maybe it's time for a fun game of fetch \
                     or their favorite treat.",
    },
    MoodTemplate {
        primary: "Excited",
        confidence: 0.87,
        description: "Your pup is super excited! High-pitched barks and energetic \
                      movements show they're ready for action.",
        suggestion: "Channel that excitement into playtime! A walk, run, or interactive \
                     toy would be perfect right now.",
    },
    MoodTemplate {
        primary: "Anxious",
        confidence: 0.78,
        description: "Your dog seems a bit worried or nervous. Low whines and tense \
                      posture suggest some anxiety.",
        suggestion: "Try to comfort them with gentle petting, their favorite blanket, \
                     or a calming activity like a puzzle toy.",
    },
    MoodTemplate {
        primary: "Curious",
        confidence: 0.85,
        description: "Your dog is in investigative mode! Alert ears and questioning \
                      barks show they're exploring something new.",
        suggestion: "Encourage their curiosity with new experiences, training \
                     exercises, or exploration games.",
    },
    MoodTemplate {
        primary: "Hungry",
        confidence: 0.91,
        description: "Those persistent barks and focused attention suggest your dog is \
                      asking for food!",
        suggestion: "Check if it's mealtime! A healthy snack or their regular meal \
                     should satisfy them.",
    },
    MoodTemplate {
        primary: "Playful",
        confidence: 0.89,
        description: "Your dog is in full play mode! Bouncy movements and playful \
                      barks indicate they want to have fun.",
        suggestion: "Time for some interactive play! Tug-of-war, fetch, or a good \
                     game of chase would be ideal.",
    },
];

/// Cat mood templates
pub const CAT_MOODS: &[MoodTemplate] = &[
    MoodTemplate {
        primary: "Content",
        confidence: 0.88,
        description: "Your cat is feeling peaceful and satisfied. Soft purring and \
                      relaxed posture show they're happy.",
        suggestion: "Perfect time for gentle petting or just letting them enjoy their \
                     comfortable spot.",
    },
    MoodTemplate {
        primary: "Attention-seeking",
        confidence: 0.82,
        description: "Your cat wants your focus! Vocal meows and direct eye contact \
                      mean they're asking for interaction.",
        suggestion: "Give them some quality attention - petting, talking to them, or \
                     engaging with their favorite toy.",
    },
    MoodTemplate {
        primary: "Hungry",
        confidence: 0.90,
        description: "Those insistent meows near their food area clearly indicate \
                      hunger!",
        suggestion: "Time to check their food bowl! A meal or healthy cat treat \
                     should satisfy their request.",
    },
    MoodTemplate {
        primary: "Territorial",
        confidence: 0.75,
        description: "Your cat is showing protective behavior. Alert posture and \
                      specific vocalizations suggest territorial feelings.",
        suggestion: "Give them space and ensure their favorite areas remain \
                     accessible. Avoid sudden changes to their environment.",
    },
    MoodTemplate {
        primary: "Curious",
        confidence: 0.83,
        description: "Your cat is in explorer mode! Focused attention and cautious \
                      movements show healthy curiosity.",
        suggestion: "Encourage safe exploration with new toys, climbing \
                     opportunities, or supervised investigation time.",
    },
    MoodTemplate {
        primary: "Stressed",
        confidence: 0.72,
        description: "Your cat seems a bit overwhelmed. Tense posture and specific \
                      vocalizations indicate some stress.",
        suggestion: "Create a calm environment with their favorite hiding spots, soft \
                     music, or calming pheromones.",
    },
];

/// Outcome of one simulated analysis
#[derive(Debug, Clone)]
pub struct MoodAssessment {
    pub mood: MoodReading,
    pub description: String,
    pub suggestion: String,
    pub detected_species: Species,
    /// Overall species-detection confidence
    pub confidence: f64,
}

/// Guess the species from file-name keywords, if any are present
pub fn species_hint(file_name: &str) -> Option<Species> {
    let name = file_name.to_lowercase();
    if name.contains("dog") || name.contains("bark") || name.contains("woof") {
        Some(Species::Dog)
    } else if name.contains("cat") || name.contains("meow") || name.contains("purr") {
        Some(Species::Cat)
    } else {
        None
    }
}

/// Run a simulated analysis over a media file name
pub fn analyze_media(file_name: &str, rng: &mut impl Rng) -> MoodAssessment {
    let detected_species = species_hint(file_name).unwrap_or_else(|| {
        if rng.gen_bool(0.5) {
            Species::Dog
        } else {
            Species::Cat
        }
    });

    let templates = match detected_species {
        Species::Dog => DOG_MOODS,
        Species::Cat => CAT_MOODS,
    };
    let template = templates[rng.gen_range(0..templates.len())];

    let confidence = ((0.85 + rng.gen::<f64>() * 0.1) * 100.0).round() / 100.0;

    MoodAssessment {
        mood: MoodReading {
            primary: template.primary.to_string(),
            secondary: None,
            confidence: template.confidence,
        },
        description: template.description.to_string(),
        suggestion: template.suggestion.to_string(),
        detected_species,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_species_hint() {
        assert_eq!(species_hint("morning_bark.mp3"), Some(Species::Dog));
        assert_eq!(species_hint("DOG_park.mp4"), Some(Species::Dog));
        assert_eq!(species_hint("sleepy_purr.wav"), Some(Species::Cat));
        assert_eq!(species_hint("Meow-3am.m4a"), Some(Species::Cat));
        assert_eq!(species_hint("mystery_noise.mp3"), None);
    }

    #[test]
    fn test_analyze_honors_hint() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let result = analyze_media("backyard_woof.mp3", &mut rng);
            assert_eq!(result.detected_species, Species::Dog);
            assert!(DOG_MOODS.iter().any(|t| t.primary == result.mood.primary));
        }
    }

    #[test]
    fn test_analyze_confidence_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let result = analyze_media("mystery_noise.mp3", &mut rng);
            assert!(result.confidence >= 0.85 && result.confidence <= 0.95);
            assert!(result.mood.confidence > 0.0 && result.mood.confidence <= 1.0);
            // Rounded to two decimal places
            let scaled = result.confidence * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_analyze_is_deterministic_given_seed() {
        let first = analyze_media("cat_window.mp4", &mut StdRng::seed_from_u64(99));
        let second = analyze_media("cat_window.mp4", &mut StdRng::seed_from_u64(99));
        assert_eq!(first.mood.primary, second.mood.primary);
        assert_eq!(first.confidence, second.confidence);
    }
}
