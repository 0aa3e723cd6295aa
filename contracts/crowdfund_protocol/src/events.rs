//! # Events
//!
//! Event payload structs and publish helpers. Every mutating entry point
//! emits exactly one event; topics carry a short symbol plus the campaign ID
//! so indexers can filter per campaign.
//!
//! | Topic        | Payload           |
//! |--------------|-------------------|
//! | `created`    | [`CampaignCreated`] |
//! | `pledge`     | [`PledgeMade`]    |
//! | `withdraw`   | [`FundsWithdrawn`] |
//! | `refund`     | [`RefundIssued`]  |
//! | `tieradd`    | [`TierAdded`]     |
//! | `tierdel`    | [`TierRemoved`]   |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub owner: Address,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PledgeMade {
    pub campaign_id: u64,
    pub patron: Address,
    pub tier_index: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub campaign_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub campaign_id: u64,
    pub patron: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierAdded {
    pub campaign_id: u64,
    pub tier_index: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierRemoved {
    pub campaign_id: u64,
    pub tier_index: u32,
}

pub fn campaign_created(env: &Env, event: CampaignCreated) {
    env.events()
        .publish((symbol_short!("created"), event.campaign_id), event);
}

pub fn pledge_made(env: &Env, event: PledgeMade) {
    env.events()
        .publish((symbol_short!("pledge"), event.campaign_id), event);
}

pub fn funds_withdrawn(env: &Env, event: FundsWithdrawn) {
    env.events()
        .publish((symbol_short!("withdraw"), event.campaign_id), event);
}

pub fn refund_issued(env: &Env, event: RefundIssued) {
    env.events()
        .publish((symbol_short!("refund"), event.campaign_id), event);
}

pub fn tier_added(env: &Env, event: TierAdded) {
    env.events()
        .publish((symbol_short!("tieradd"), event.campaign_id), event);
}

pub fn tier_removed(env: &Env, event: TierRemoved) {
    env.events()
        .publish((symbol_short!("tierdel"), event.campaign_id), event);
}
