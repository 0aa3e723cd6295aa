//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! crowdfund protocol:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                            |
//! |------------------|-----------|----------------------------------------|
//! | `Admin`          | `Address` | Registry admin (gates creation pause)  |
//! | `FundingToken`   | `Address` | Token all campaigns are funded in      |
//! | `CampaignCount`  | `u64`     | Auto-increment campaign ID counter     |
//! | `CreationPaused` | `bool`    | When set, `create_campaign` is blocked |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day
//! remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                 | Type             | Description                    |
//! |---------------------|------------------|--------------------------------|
//! | `Config(id)`        | `CampaignConfig` | Immutable campaign config      |
//! | `State(id)`         | `CampaignState`  | Mutable campaign state         |
//! | `Tiers(id)`         | `Vec<Tier>`      | Ordered pledge tiers           |
//! | `Patron(id, addr)`  | `PatronRecord`   | Per-patron donation accounting |
//! | `OwnerIndex(addr)`  | `Vec<u64>`       | Campaign IDs by owner          |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Why split Config and State?
//!
//! Pledges are the high-frequency write. Writing the full campaign struct
//! (name and description included) on every pledge is wasteful; the state
//! entry is a few dozen bytes, so separating it keeps ledger write costs low
//! while the public API stays clean via the reconstructed
//! [`Campaign`] return type.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::types::{Campaign, CampaignConfig, CampaignState, PatronRecord, Tier};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended
/// together. Persistent-tier keys hold per-campaign data with independent
/// TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registry admin address (Instance).
    Admin,
    /// Funding token contract address (Instance).
    FundingToken,
    /// Global auto-increment counter for campaign IDs (Instance).
    CampaignCount,
    /// Registry-level pause flag gating campaign creation (Instance).
    CreationPaused,
    /// Immutable campaign configuration keyed by ID (Persistent).
    Config(u64),
    /// Mutable campaign state keyed by ID (Persistent).
    State(u64),
    /// Ordered tier list keyed by campaign ID (Persistent).
    Tiers(u64),
    /// Patron accounting keyed by (campaign ID, patron) (Persistent).
    Patron(u64, Address),
    /// Campaign IDs created by an owner (Persistent).
    OwnerIndex(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

/// Store the admin and funding token. Called once from `init`.
pub fn init_registry(env: &Env, admin: &Address, token: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    env.storage().instance().set(&DataKey::FundingToken, token);
    bump_instance(env);
}

/// Retrieve the registry admin. Fails when `init` has not run.
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Admin) {
        Some(admin) => admin,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

/// Retrieve the funding token address. Fails when `init` has not run.
pub fn get_funding_token(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::FundingToken) {
        Some(token) => token,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

/// Atomically reads, increments, and stores the campaign counter.
/// Returns the ID to use for the *current* campaign (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

pub fn get_campaign_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

pub fn is_creation_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::CreationPaused)
        .unwrap_or(false)
}

pub fn set_creation_paused(env: &Env, paused: bool) {
    env.storage()
        .instance()
        .set(&DataKey::CreationPaused, &paused);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save config, initial state, an empty tier list, and the owner-index entry
/// for a newly created campaign.
pub fn save_new_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    let config_key = DataKey::Config(config.id);
    let state_key = DataKey::State(config.id);
    let tiers_key = DataKey::Tiers(config.id);

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    env.storage()
        .persistent()
        .set(&tiers_key, &Vec::<Tier>::new(env));
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
    bump_persistent(env, &tiers_key);

    let index_key = DataKey::OwnerIndex(config.owner.clone());
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&index_key)
        .unwrap_or_else(|| Vec::new(env));
    ids.push_back(config.id);
    env.storage().persistent().set(&index_key, &ids);
    bump_persistent(env, &index_key);
}

/// Load the full `Campaign` by combining config and state.
pub fn load_campaign(env: &Env, id: u64) -> Campaign {
    let config = load_campaign_config(env, id);
    let state = load_campaign_state(env, id);
    Campaign {
        id: config.id,
        owner: config.owner,
        name: config.name,
        description: config.description,
        goal: config.goal,
        balance: state.balance,
        deadline: state.deadline,
        status: state.status,
        paused: state.paused,
    }
}

/// Load only the immutable campaign configuration.
/// Fails with `CampaignNotFound` for unknown IDs.
pub fn load_campaign_config(env: &Env, id: u64) -> CampaignConfig {
    let key = DataKey::Config(id);
    let config: CampaignConfig = match env.storage().persistent().get(&key) {
        Some(config) => config,
        None => panic_with_error!(env, Error::CampaignNotFound),
    };
    bump_persistent(env, &key);
    config
}

/// Load only the mutable campaign state.
pub fn load_campaign_state(env: &Env, id: u64) -> CampaignState {
    let key = DataKey::State(id);
    let state: CampaignState = match env.storage().persistent().get(&key) {
        Some(state) => state,
        None => panic_with_error!(env, Error::CampaignNotFound),
    };
    bump_persistent(env, &key);
    state
}

/// Save only the mutable campaign state (optimized for pledges/settlement).
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::State(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the ordered tier list for a campaign.
pub fn load_tiers(env: &Env, id: u64) -> Vec<Tier> {
    let key = DataKey::Tiers(id);
    let tiers: Vec<Tier> = match env.storage().persistent().get(&key) {
        Some(tiers) => tiers,
        None => panic_with_error!(env, Error::CampaignNotFound),
    };
    bump_persistent(env, &key);
    tiers
}

pub fn save_tiers(env: &Env, id: u64, tiers: &Vec<Tier>) {
    let key = DataKey::Tiers(id);
    env.storage().persistent().set(&key, tiers);
    bump_persistent(env, &key);
}

/// Load a patron's record, or a fresh zeroed one when the patron has not
/// pledged to this campaign yet.
pub fn load_patron(env: &Env, id: u64, patron: &Address) -> PatronRecord {
    let key = DataKey::Patron(id, patron.clone());
    match env.storage().persistent().get(&key) {
        Some(record) => {
            bump_persistent(env, &key);
            record
        }
        None => PatronRecord {
            total_donation: 0,
            funded_tiers: Vec::new(env),
        },
    }
}

pub fn save_patron(env: &Env, id: u64, patron: &Address, record: &PatronRecord) {
    let key = DataKey::Patron(id, patron.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

/// Campaign IDs created by `owner`, oldest first.
pub fn load_owner_index(env: &Env, owner: &Address) -> Vec<u64> {
    let key = DataKey::OwnerIndex(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(ids) => {
            bump_persistent(env, &key);
            ids
        }
        None => Vec::new(env),
    }
}
