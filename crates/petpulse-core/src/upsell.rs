//! Upsell trigger evaluation
//!
//! Unlike the personality classifier, trigger evaluation is collect-all: every
//! condition that holds contributes a trigger, and the result is ordered by
//! ascending priority. The caller presents the head of the list and owns any
//! debouncing of repeated prompts.

use serde::Serialize;

use crate::subscription::{LedgerState, Plan, FREE_USAGE_LIMIT};

/// Distinct anxious/stressed labels required for the mood-pattern trigger
pub const ANXIOUS_PATTERN_THRESHOLD: usize = 3;

/// Analyses required before the personality unlock is worth pitching
pub const PERSONALITY_UNLOCK_COUNT: i64 = 5;

/// Kinds of monetization prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Free allowance nearly or fully consumed
    UsageLimit,
    /// Run of anxious/stressed readings worth a care pitch
    MoodPattern,
    /// Enough history for a personality profile the free plan can't see
    PersonalityUnlock,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsageLimit => "usage_limit",
            Self::MoodPattern => "mood_pattern",
            Self::PersonalityUnlock => "personality_unlock",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate monetization prompt. Ephemeral - recomputed per evaluation,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct UpsellTrigger {
    pub kind: TriggerKind,
    /// Human-readable condition description for the prompt surface
    pub condition: &'static str,
    /// Lower = more urgent
    pub priority: u8,
}

/// Evaluate all upsell conditions against the current state
///
/// `recent_moods` is a short window of primary labels, conventionally the
/// last 5 stored plus the newly produced one. Returns matched triggers
/// sorted ascending by priority; empty when nothing applies.
pub fn evaluate_triggers(
    state: &LedgerState,
    analysis_count: i64,
    recent_moods: &[String],
) -> Vec<UpsellTrigger> {
    let mut triggers = Vec::new();

    if state.plan == Plan::Free && state.usage_count >= FREE_USAGE_LIMIT - 1 {
        triggers.push(UpsellTrigger {
            kind: TriggerKind::UsageLimit,
            condition: "Approaching free usage limit",
            priority: 1,
        });
    }

    let anxious = recent_moods
        .iter()
        .filter(|m| m.as_str() == "Anxious" || m.as_str() == "Stressed")
        .count();
    if anxious >= ANXIOUS_PATTERN_THRESHOLD {
        triggers.push(UpsellTrigger {
            kind: TriggerKind::MoodPattern,
            condition: "Multiple anxious moods detected",
            priority: 2,
        });
    }

    if analysis_count >= PERSONALITY_UNLOCK_COUNT && state.plan == Plan::Free {
        triggers.push(UpsellTrigger {
            kind: TriggerKind::PersonalityUnlock,
            condition: "Personality analysis available",
            priority: 3,
        });
    }

    triggers.sort_by_key(|t| t.priority);
    triggers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::LedgerState;
    use chrono::{TimeZone, Utc};

    fn free_state(usage_count: u32) -> LedgerState {
        let mut state = LedgerState::new_free(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        state.usage_count = usage_count;
        state
    }

    fn moods(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_no_triggers() {
        let triggers = evaluate_triggers(&free_state(0), 2, &moods(&["Happy", "Content"]));
        assert!(triggers.is_empty());
    }

    #[test]
    fn test_usage_limit_trigger() {
        // Fires at limit - 1 and beyond
        assert!(evaluate_triggers(&free_state(3), 0, &[]).is_empty());

        let triggers = evaluate_triggers(&free_state(4), 0, &[]);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].kind, TriggerKind::UsageLimit);
        assert_eq!(triggers[0].priority, 1);

        assert_eq!(evaluate_triggers(&free_state(5), 0, &[]).len(), 1);
    }

    #[test]
    fn test_mood_pattern_trigger() {
        let two = moods(&["Anxious", "Stressed", "Happy"]);
        assert!(evaluate_triggers(&free_state(0), 0, &two).is_empty());

        let three = moods(&["Anxious", "Stressed", "Anxious", "Happy"]);
        let triggers = evaluate_triggers(&free_state(0), 0, &three);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].kind, TriggerKind::MoodPattern);

        // Exact-match labels only
        let lowercase = moods(&["anxious", "stressed", "anxious"]);
        assert!(evaluate_triggers(&free_state(0), 0, &lowercase).is_empty());
    }

    #[test]
    fn test_personality_unlock_trigger() {
        assert!(evaluate_triggers(&free_state(0), 4, &[]).is_empty());

        let triggers = evaluate_triggers(&free_state(0), 5, &[]);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].kind, TriggerKind::PersonalityUnlock);
    }

    #[test]
    fn test_plus_plan_suppresses_monetization() {
        let mut state = free_state(5);
        state.plan = crate::subscription::Plan::Plus;

        // Mood pattern is informational and still fires; the plan-gated
        // triggers do not.
        let triggers = evaluate_triggers(&state, 10, &moods(&["Anxious", "Anxious", "Stressed"]));
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].kind, TriggerKind::MoodPattern);
    }

    #[test]
    fn test_all_triggers_sorted_by_priority() {
        let recent = moods(&["Anxious", "Stressed", "Anxious", "Happy"]);
        let triggers = evaluate_triggers(&free_state(4), 6, &recent);

        let kinds: Vec<TriggerKind> = triggers.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TriggerKind::UsageLimit,
                TriggerKind::MoodPattern,
                TriggerKind::PersonalityUnlock
            ]
        );
        let priorities: Vec<u8> = triggers.iter().map(|t| t.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);

        // No duplicate kinds
        let mut deduped = kinds.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), kinds.len());
    }
}
