//! Usage ledger persistence
//!
//! The ledger is a single row (`id = 1`). State-machine logic lives in
//! [`crate::subscription`]; this module only loads and stores the row.

use rusqlite::{params, OptionalExtension};

use super::{format_datetime, parse_datetime, Database};
use crate::error::Result;
use crate::subscription::{LedgerState, Plan};

impl Database {
    /// Load the metering row, if one has been written yet
    pub fn load_ledger(&self) -> Result<Option<LedgerState>> {
        let conn = self.conn()?;

        let state = conn
            .query_row(
                r#"
                SELECT plan, usage_count, last_reset_at, plan_started_at, plan_expires_at
                FROM usage_ledger
                WHERE id = 1
                "#,
                [],
                |row| {
                    let plan_str: String = row.get(0)?;
                    let last_reset_str: String = row.get(2)?;
                    let started_str: Option<String> = row.get(3)?;
                    let expires_str: Option<String> = row.get(4)?;

                    Ok(LedgerState {
                        plan: plan_str.parse().unwrap_or(Plan::Free),
                        usage_count: row.get(1)?,
                        last_reset_at: parse_datetime(&last_reset_str),
                        plan_started_at: started_str.map(|s| parse_datetime(&s)),
                        plan_expires_at: expires_str.map(|s| parse_datetime(&s)),
                    })
                },
            )
            .optional()?;

        Ok(state)
    }

    /// Write the metering row, creating or replacing it
    pub fn save_ledger(&self, state: &LedgerState) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO usage_ledger (id, plan, usage_count, last_reset_at, plan_started_at, plan_expires_at)
            VALUES (1, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                plan = excluded.plan,
                usage_count = excluded.usage_count,
                last_reset_at = excluded.last_reset_at,
                plan_started_at = excluded.plan_started_at,
                plan_expires_at = excluded.plan_expires_at
            "#,
            params![
                state.plan.as_str(),
                state.usage_count,
                format_datetime(state.last_reset_at),
                state.plan_started_at.map(format_datetime),
                state.plan_expires_at.map(format_datetime),
            ],
        )?;

        Ok(())
    }
}
