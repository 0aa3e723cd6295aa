//! # Status derivation
//!
//! The campaign state machine. Status is never advanced by a timer; it is
//! recomputed lazily from balance and ledger time at the top (and, for
//! pledges, also at the bottom) of every mutating entry point, and on
//! read-only status queries.
//!
//! [`derive_status`] is the single pure transition function; every caller
//! goes through it so the rules live in exactly one place:
//!
//! - `Active` + `balance >= goal` → `Funded`, regardless of the deadline.
//! - `Active` + `now >= deadline` → `Failed`.
//! - `Funded` and `Failed` are sticky; once reached, nothing changes them.

use soroban_sdk::Env;

use crate::storage;
use crate::types::{CampaignState, CampaignStatus};

/// Pure projection of the current status.
///
/// Goal attainment wins over deadline expiry: a campaign whose balance
/// crossed the goal is `Funded` even when evaluated after the deadline.
pub fn derive_status(
    stored: &CampaignStatus,
    balance: i128,
    goal: i128,
    now: u64,
    deadline: u64,
) -> CampaignStatus {
    match stored {
        CampaignStatus::Active => {
            if balance >= goal {
                CampaignStatus::Funded
            } else if now >= deadline {
                CampaignStatus::Failed
            } else {
                CampaignStatus::Active
            }
        }
        // Terminal states never transition.
        terminal => terminal.clone(),
    }
}

/// Recompute the status from current balance and ledger time and persist it
/// when it changed.
///
/// Idempotent: once the campaign is `Funded` or `Failed`, repeated calls
/// write nothing. Mutating entry points call this before gating on status so
/// stored and derived status never diverge across successful calls.
pub fn sync_status(env: &Env, id: u64, state: &mut CampaignState, goal: i128) {
    let derived = derive_status(
        &state.status,
        state.balance,
        goal,
        env.ledger().timestamp(),
        state.deadline,
    );
    if derived != state.status {
        state.status = derived;
        storage::save_campaign_state(env, id, state);
    }
}
