//! # Types
//!
//! Shared data structures used across all modules of the crowdfund protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Campaign` is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at creation; never mutated.
//! - [`CampaignState`] — written on every pledge, settlement, pause toggle
//!   and deadline extension.
//!
//! The public API exposes the reconstructed [`Campaign`] struct for
//! convenience. Tiers and patron records are separate entries again, so a
//! pledge touches only the small state entry, the tier list, and one patron
//! record.
//!
//! ### Status as a Finite-State Machine
//!
//! [`CampaignStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Active ──► Funded      (balance reached the goal, even before deadline)
//! Active ──► Failed      (deadline passed below the goal)
//! ```
//!
//! `Funded` and `Failed` are terminal; the derivation in [`crate::status`]
//! never leaves them.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle status of a campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting pledges.
    Active,
    /// Goal reached; owner may withdraw.
    Funded,
    /// Deadline passed below the goal; patrons may claim refunds.
    Failed,
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    /// Address that created the campaign and receives funds on success.
    pub owner: Address,
    pub name: String,
    pub description: String,
    /// Target amount in units of the registry's funding token.
    pub goal: i128,
}

/// Mutable campaign state, updated on pledges, settlement and admin calls.
///
/// Kept small so that frequent writes (pledges) are cheap. The deadline
/// lives here rather than in the config because `extend_deadline` mutates it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub balance: i128,
    pub deadline: u64,
    pub status: CampaignStatus,
    /// Gates `pledge` only; settlement stays available while paused.
    pub paused: bool,
}

/// A fixed-price pledge tier.
///
/// `patron_count` counts distinct patrons who have funded this tier at least
/// once; repeat pledges by the same patron do not re-increment it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub name: String,
    /// Exact amount a pledge to this tier must carry.
    pub amount: i128,
    pub patron_count: u32,
}

/// Per-patron accounting for one campaign, created lazily on first pledge.
///
/// `funded_tiers` holds positional tier indices. Removing a tier shifts the
/// tier list but NOT these indices, so a membership entry can come to refer
/// to a different tier after removal. This mirrors the upstream behavior and
/// is covered by tests rather than corrected here.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatronRecord {
    /// Cumulative donation; reset to zero by a refund.
    pub total_donation: i128,
    /// Tier indices this patron has funded at least once.
    pub funded_tiers: Vec<u32>,
}

/// Full representation of a campaign.
///
/// Used as the public API return type; reconstructed internally from the
/// split `CampaignConfig` + `CampaignState` storage entries. Tiers are
/// queried separately via `get_tiers`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Unique identifier (auto-incremented).
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub description: String,
    pub goal: i128,
    /// Cumulative un-refunded, un-withdrawn pledges.
    pub balance: i128,
    /// Ledger timestamp after which an unfunded campaign fails.
    pub deadline: u64,
    /// Stored status; may lag the derived one until the next mutating call.
    pub status: CampaignStatus,
    pub paused: bool,
}
