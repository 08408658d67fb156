//! Plan tiers, usage metering, and feature gating
//!
//! The free plan meters mood analyses against a monthly allowance; the plus
//! plan is unlimited. Metering state is a single persisted row read through
//! [`UsageLedger`], which applies the lazy reset-on-read policy: the counter
//! only rolls over when somebody looks at it, never on a timer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::error::Result;

/// Analyses included in the free plan per reset window
pub const FREE_USAGE_LIMIT: u32 = 5;

/// Days between usage resets on the free plan
pub const USAGE_RESET_DAYS: i64 = 30;

/// Length of a purchased plus term (policy stamp only; expiry is not
/// enforced by this engine)
pub const PLUS_TERM_DAYS: i64 = 365;

/// Subscription plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Metered free tier
    Free,
    /// Unlimited paid tier
    Plus,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Plus => "plus",
        }
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "plus" => Ok(Self::Plus),
            _ => Err(format!("Unknown plan: {}", s)),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gated features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Running a mood analysis (metered on the free plan)
    Analysis,
    /// Diary report export (plus only)
    ReportExport,
    /// 8-week trend view (plus only)
    MoodTrends,
    /// Personality profile view (plus only)
    Personality,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::ReportExport => "report_export",
            Self::MoodTrends => "mood_trends",
            Self::Personality => "personality",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted metering state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerState {
    pub plan: Plan,
    pub usage_count: u32,
    pub last_reset_at: DateTime<Utc>,
    pub plan_started_at: Option<DateTime<Utc>>,
    pub plan_expires_at: Option<DateTime<Utc>>,
}

impl LedgerState {
    /// Fresh free-plan state, reset window starting now
    pub fn new_free(now: DateTime<Utc>) -> Self {
        Self {
            plan: Plan::Free,
            usage_count: 0,
            last_reset_at: now,
            plan_started_at: None,
            plan_expires_at: None,
        }
    }

    /// Whether the lazy reset applies: free plan, 30 or more days since the
    /// last reset (inclusive boundary)
    pub fn should_reset(&self, now: DateTime<Utc>) -> bool {
        self.plan == Plan::Free && now - self.last_reset_at >= Duration::days(USAGE_RESET_DAYS)
    }

    /// Whether a feature may be consumed under this state
    ///
    /// Plus: everything. Free: analyses while under the allowance; premium
    /// features are closed regardless of the counter.
    pub fn can_use(&self, feature: Feature) -> bool {
        match self.plan {
            Plan::Plus => true,
            Plan::Free => match feature {
                Feature::Analysis => self.usage_count < FREE_USAGE_LIMIT,
                Feature::ReportExport | Feature::MoodTrends | Feature::Personality => false,
            },
        }
    }

    /// Analyses left in the current window; `None` means unlimited
    pub fn remaining(&self) -> Option<u32> {
        match self.plan {
            Plan::Plus => None,
            Plan::Free => Some(FREE_USAGE_LIMIT.saturating_sub(self.usage_count)),
        }
    }
}

/// Result of a ledger read, reporting whether the lazy reset fired
#[derive(Debug, Clone)]
pub struct LedgerRead {
    pub state: LedgerState,
    pub was_reset: bool,
}

/// Usage ledger over the persisted metering row
///
/// Owns the read-modify-persist sequences. Single-process single-writer is
/// assumed; the pooled store serializes statement execution.
pub struct UsageLedger<'a> {
    db: &'a Database,
}

impl<'a> UsageLedger<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read the ledger, applying the lazy reset when it is due
    ///
    /// Initializes a default free-plan row on first read. Reading twice
    /// inside the window leaves the counter untouched.
    pub fn read(&self, now: DateTime<Utc>) -> Result<LedgerRead> {
        let mut state = match self.db.load_ledger()? {
            Some(state) => state,
            None => {
                let state = LedgerState::new_free(now);
                self.db.save_ledger(&state)?;
                return Ok(LedgerRead {
                    state,
                    was_reset: false,
                });
            }
        };

        if state.should_reset(now) {
            info!(
                previous_count = state.usage_count,
                "Usage window elapsed, resetting counter"
            );
            state.usage_count = 0;
            state.last_reset_at = now;
            self.db.save_ledger(&state)?;
            return Ok(LedgerRead {
                state,
                was_reset: true,
            });
        }

        Ok(LedgerRead {
            state,
            was_reset: false,
        })
    }

    /// Count one consumed analysis
    ///
    /// Never clamps or rejects - callers gate with `can_use` first.
    pub fn increment(&self, now: DateTime<Utc>) -> Result<LedgerState> {
        let mut state = self.read(now)?.state;
        state.usage_count += 1;
        self.db.save_ledger(&state)?;
        Ok(state)
    }

    pub fn can_use(&self, feature: Feature, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.read(now)?.state.can_use(feature))
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Result<Option<u32>> {
        Ok(self.read(now)?.state.remaining())
    }

    /// Switch to the plus plan, stamping a one-year term
    ///
    /// There is no downgrade operation.
    pub fn upgrade(&self, now: DateTime<Utc>) -> Result<LedgerState> {
        let mut state = self.read(now)?.state;
        state.plan = Plan::Plus;
        state.plan_started_at = Some(now);
        state.plan_expires_at = Some(now + Duration::days(PLUS_TERM_DAYS));
        self.db.save_ledger(&state)?;
        info!("Upgraded to the plus plan");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_should_reset_boundary() {
        let state = LedgerState::new_free(at(2026, 1, 1));

        assert!(!state.should_reset(at(2026, 1, 1)));
        assert!(!state.should_reset(at(2026, 1, 30)));
        // Exactly 30 days: inclusive
        assert!(state.should_reset(at(2026, 1, 31)));
        assert!(state.should_reset(at(2026, 3, 1)));
    }

    #[test]
    fn test_plus_plan_never_resets() {
        let mut state = LedgerState::new_free(at(2026, 1, 1));
        state.plan = Plan::Plus;
        assert!(!state.should_reset(at(2027, 1, 1)));
    }

    #[test]
    fn test_can_use_matrix() {
        let mut state = LedgerState::new_free(at(2026, 1, 1));

        assert!(state.can_use(Feature::Analysis));
        assert!(!state.can_use(Feature::ReportExport));
        assert!(!state.can_use(Feature::MoodTrends));
        assert!(!state.can_use(Feature::Personality));

        state.usage_count = FREE_USAGE_LIMIT;
        assert!(!state.can_use(Feature::Analysis));

        state.plan = Plan::Plus;
        assert!(state.can_use(Feature::Analysis));
        assert!(state.can_use(Feature::ReportExport));
        assert!(state.can_use(Feature::MoodTrends));
        assert!(state.can_use(Feature::Personality));
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let mut state = LedgerState::new_free(at(2026, 1, 1));
        assert_eq!(state.remaining(), Some(5));

        state.usage_count = 4;
        assert_eq!(state.remaining(), Some(1));

        // Over the limit (increment never clamps): remaining floors at 0
        state.usage_count = 7;
        assert_eq!(state.remaining(), Some(0));

        state.plan = Plan::Plus;
        assert_eq!(state.remaining(), None);
    }

    #[test]
    fn test_read_initializes_and_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let ledger = UsageLedger::new(&db);
        let now = at(2026, 1, 1);

        let first = ledger.read(now).unwrap();
        assert_eq!(first.state.plan, Plan::Free);
        assert_eq!(first.state.usage_count, 0);
        assert!(!first.was_reset);

        // Second read inside the window changes nothing
        let second = ledger.read(now).unwrap();
        assert_eq!(second.state.usage_count, 0);
        assert!(!second.was_reset);
        assert_eq!(second.state.last_reset_at, first.state.last_reset_at);
    }

    #[test]
    fn test_lazy_reset_fires_once() {
        let db = Database::in_memory().unwrap();
        let ledger = UsageLedger::new(&db);

        ledger.read(at(2026, 1, 1)).unwrap();
        ledger.increment(at(2026, 1, 2)).unwrap();
        ledger.increment(at(2026, 1, 3)).unwrap();

        let read = ledger.read(at(2026, 2, 5)).unwrap();
        assert!(read.was_reset);
        assert_eq!(read.state.usage_count, 0);
        assert_eq!(read.state.last_reset_at, at(2026, 2, 5));

        // Immediately after, the window is fresh
        let again = ledger.read(at(2026, 2, 6)).unwrap();
        assert!(!again.was_reset);
    }

    #[test]
    fn test_scenario_free_limit_consumption() {
        let db = Database::in_memory().unwrap();
        let ledger = UsageLedger::new(&db);
        let now = at(2026, 1, 10);

        for _ in 0..4 {
            ledger.increment(now).unwrap();
        }
        assert!(ledger.can_use(Feature::Analysis, now).unwrap());
        assert_eq!(ledger.remaining(now).unwrap(), Some(1));

        ledger.increment(now).unwrap();
        assert!(!ledger.can_use(Feature::Analysis, now).unwrap());
        assert_eq!(ledger.remaining(now).unwrap(), Some(0));
    }

    #[test]
    fn test_upgrade_stamps_term_and_persists() {
        let db = Database::in_memory().unwrap();
        let ledger = UsageLedger::new(&db);
        let now = at(2026, 1, 10);

        let state = ledger.upgrade(now).unwrap();
        assert_eq!(state.plan, Plan::Plus);
        assert_eq!(state.plan_started_at, Some(now));
        assert_eq!(
            state.plan_expires_at,
            Some(now + Duration::days(PLUS_TERM_DAYS))
        );

        // Survives a fresh read, and everything is unlocked
        let read = ledger.read(at(2026, 6, 1)).unwrap();
        assert_eq!(read.state.plan, Plan::Plus);
        assert!(read.state.can_use(Feature::Personality));
        assert_eq!(read.state.remaining(), None);
    }
}
