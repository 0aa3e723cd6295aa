//! # Crowdfund Protocol Contract
//!
//! Root crate of the crowdfunding campaign engine. It exposes the single
//! Soroban contract `CrowdfundProtocol` whose entry points cover the full
//! campaign lifecycle:
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`CrowdfundProtocol::init`]                           |
//! | Registry     | `create_campaign`, `toggle_creation_pause`            |
//! | Tiers        | `add_tier`, `remove_tier`                             |
//! | Pledging     | [`CrowdfundProtocol::pledge`], `toggle_pause`         |
//! | Settlement   | `withdraw`, `refund`, `extend_deadline`               |
//! | Queries      | `get_campaign`, `get_campaigns`, `get_owner_campaigns`, `get_tiers`, `get_status`, `get_patron_record` |
//!
//! ## Architecture
//!
//! Status derivation is fully delegated to [`status`]. Storage access is
//! fully delegated to [`storage`]. Event payloads live in [`events`]. This
//! file contains **only** the public entry points, authorization guards, and
//! event emissions — no storage or transition logic lives here directly.
//!
//! ## Ordering discipline
//!
//! Soroban runs one invocation at a time, so the only ordering rule that
//! matters is checks-effects-interactions: balances, patron totals, and
//! status are persisted before any outbound token transfer. A failed
//! transfer panics with [`Error::TransferFailed`], which makes the host
//! revert every write of the invocation — settlement is all-or-nothing.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String, Vec,
};

mod events;
mod status;
mod storage;
mod types;

#[cfg(test)]
mod test_events;

pub use types::{Campaign, CampaignStatus, PatronRecord, Tier};

const SECONDS_PER_DAY: u64 = 86_400;

/// Campaigns shorter than this are rejected at creation.
const MIN_DURATION_DAYS: u64 = 1;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized    = 1,
    NotInitialized        = 2,
    NotAuthorized         = 3,
    CampaignNotFound      = 4,
    InvalidName           = 5,
    InvalidDescription    = 6,
    InvalidGoal           = 7,
    InvalidDuration       = 8,
    InvalidAmount         = 9,
    InvalidTier           = 10,
    CreationPaused        = 11,
    CampaignPaused        = 12,
    CampaignNotActive     = 13,
    CampaignNotSuccessful = 14,
    RefundNotAvailable    = 15,
    NoBalanceToWithdraw   = 16,
    NothingToRefund       = 17,
    TransferFailed        = 18,
}

/// Require that `caller` signed the invocation and matches `expected`.
///
/// Single authorization guard shared by every owner/admin-gated entry point.
fn require_caller(env: &Env, expected: &Address, caller: &Address) {
    caller.require_auth();
    if caller != expected {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

#[contract]
pub struct CrowdfundProtocol;

#[contractimpl]
impl CrowdfundProtocol {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the registry with its admin and the funding token.
    ///
    /// Must be called exactly once immediately after deployment. Subsequent
    /// calls panic with `Error::AlreadyInitialized`. All campaigns pledge
    /// and settle in `token`.
    pub fn init(env: Env, admin: Address, token: Address) {
        admin.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::init_registry(&env, &admin, &token);
    }

    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────

    /// Create a new campaign owned by `creator`.
    ///
    /// The campaign starts `Active` with a deadline `duration_days` days
    /// from now. Fails while campaign creation is paused, and on empty
    /// name/description, non-positive goal, or a duration below
    /// `MIN_DURATION_DAYS`.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        name: String,
        description: String,
        goal: i128,
        duration_days: u64,
    ) -> Campaign {
        creator.require_auth();

        // Pledging needs the funding token, so refuse to create before init.
        if !storage::is_initialized(&env) {
            panic_with_error!(&env, Error::NotInitialized);
        }
        if storage::is_creation_paused(&env) {
            panic_with_error!(&env, Error::CreationPaused);
        }
        if name.len() == 0 {
            panic_with_error!(&env, Error::InvalidName);
        }
        if description.len() == 0 {
            panic_with_error!(&env, Error::InvalidDescription);
        }
        if goal <= 0 {
            panic_with_error!(&env, Error::InvalidGoal);
        }
        if duration_days < MIN_DURATION_DAYS {
            panic_with_error!(&env, Error::InvalidDuration);
        }

        let id = storage::get_and_increment_campaign_id(&env);
        let deadline = env.ledger().timestamp() + duration_days * SECONDS_PER_DAY;

        let config = types::CampaignConfig {
            id,
            owner: creator,
            name,
            description,
            goal,
        };
        let state = types::CampaignState {
            balance: 0,
            deadline,
            status: CampaignStatus::Active,
            paused: false,
        };
        storage::save_new_campaign(&env, &config, &state);

        events::campaign_created(
            &env,
            events::CampaignCreated {
                campaign_id: id,
                owner: config.owner.clone(),
                goal,
                deadline,
            },
        );

        Campaign {
            id,
            owner: config.owner,
            name: config.name,
            description: config.description,
            goal,
            balance: 0,
            deadline,
            status: CampaignStatus::Active,
            paused: false,
        }
    }

    /// Flip the registry-level pause flag gating `create_campaign`.
    /// Admin-only.
    pub fn toggle_creation_pause(env: Env, caller: Address) -> bool {
        let admin = storage::get_admin(&env);
        require_caller(&env, &admin, &caller);
        let paused = !storage::is_creation_paused(&env);
        storage::set_creation_paused(&env, paused);
        paused
    }

    /// Retrieve a campaign by its ID.
    pub fn get_campaign(env: Env, campaign_id: u64) -> Campaign {
        storage::load_campaign(&env, campaign_id)
    }

    /// All campaigns, in creation order.
    pub fn get_campaigns(env: Env) -> Vec<Campaign> {
        let mut campaigns = Vec::new(&env);
        for id in 0..storage::get_campaign_count(&env) {
            campaigns.push_back(storage::load_campaign(&env, id));
        }
        campaigns
    }

    /// Campaigns created by `owner`, oldest first.
    pub fn get_owner_campaigns(env: Env, owner: Address) -> Vec<Campaign> {
        let mut campaigns = Vec::new(&env);
        for id in storage::load_owner_index(&env, &owner).iter() {
            campaigns.push_back(storage::load_campaign(&env, id));
        }
        campaigns
    }

    // ─────────────────────────────────────────────────────────
    // Tiers
    // ─────────────────────────────────────────────────────────

    /// Append a pledge tier with zero patrons. Owner-only.
    ///
    /// Tier management is deliberately not status-gated: the upstream
    /// behavior allows tier edits on concluded campaigns, and this port
    /// preserves that.
    pub fn add_tier(env: Env, campaign_id: u64, caller: Address, name: String, amount: i128) -> u32 {
        let config = storage::load_campaign_config(&env, campaign_id);
        require_caller(&env, &config.owner, &caller);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let mut tiers = storage::load_tiers(&env, campaign_id);
        tiers.push_back(Tier {
            name,
            amount,
            patron_count: 0,
        });
        storage::save_tiers(&env, campaign_id, &tiers);

        let tier_index = tiers.len() - 1;
        events::tier_added(
            &env,
            events::TierAdded {
                campaign_id,
                tier_index,
            },
        );
        tier_index
    }

    /// Remove the tier at `tier_index`, shifting later tiers one position
    /// left. Owner-only.
    ///
    /// Patron membership indices are NOT remapped; see `types::PatronRecord`.
    pub fn remove_tier(env: Env, campaign_id: u64, caller: Address, tier_index: u32) {
        let config = storage::load_campaign_config(&env, campaign_id);
        require_caller(&env, &config.owner, &caller);

        let mut tiers = storage::load_tiers(&env, campaign_id);
        if tiers.remove(tier_index).is_none() {
            panic_with_error!(&env, Error::InvalidTier);
        }
        storage::save_tiers(&env, campaign_id, &tiers);

        events::tier_removed(
            &env,
            events::TierRemoved {
                campaign_id,
                tier_index,
            },
        );
    }

    /// Ordered snapshot of the campaign's tiers.
    pub fn get_tiers(env: Env, campaign_id: u64) -> Vec<Tier> {
        storage::load_tiers(&env, campaign_id)
    }

    // ─────────────────────────────────────────────────────────
    // Pledging
    // ─────────────────────────────────────────────────────────

    /// Pledge `amount` to the tier at `tier_index`.
    ///
    /// `amount` must equal the tier's fixed amount exactly; pledges are
    /// neither partial nor over-payable. The first pledge of a patron to a
    /// given tier index increments that tier's patron count; repeats only
    /// raise the patron's total donation. Crossing the goal flips the
    /// campaign to `Funded` within the same call.
    pub fn pledge(env: Env, campaign_id: u64, patron: Address, tier_index: u32, amount: i128) {
        patron.require_auth();

        let config = storage::load_campaign_config(&env, campaign_id);
        let mut state = storage::load_campaign_state(&env, campaign_id);

        if state.paused {
            panic_with_error!(&env, Error::CampaignPaused);
        }
        status::sync_status(&env, campaign_id, &mut state, config.goal);
        if state.status != CampaignStatus::Active {
            panic_with_error!(&env, Error::CampaignNotActive);
        }

        let mut tiers = storage::load_tiers(&env, campaign_id);
        let mut tier = match tiers.get(tier_index) {
            Some(tier) => tier,
            None => panic_with_error!(&env, Error::InvalidTier),
        };
        if amount != tier.amount {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        // Inbound transfer: patron funds move into the contract.
        let token_client = token::Client::new(&env, &storage::get_funding_token(&env));
        token_client.transfer(&patron, &env.current_contract_address(), &amount);

        // First-time-per-tier patron counting; repeats only add donation.
        let mut record = storage::load_patron(&env, campaign_id, &patron);
        if !record.funded_tiers.contains(&tier_index) {
            record.funded_tiers.push_back(tier_index);
            tier.patron_count += 1;
            tiers.set(tier_index, tier);
            storage::save_tiers(&env, campaign_id, &tiers);
        }
        record.total_donation += amount;
        storage::save_patron(&env, campaign_id, &patron, &record);

        state.balance += amount;
        storage::save_campaign_state(&env, campaign_id, &state);

        events::pledge_made(
            &env,
            events::PledgeMade {
                campaign_id,
                patron,
                tier_index,
            },
        );

        // The pledge may have crossed the goal.
        status::sync_status(&env, campaign_id, &mut state, config.goal);
    }

    /// Flip the campaign's pause flag gating `pledge`. Owner-only.
    pub fn toggle_pause(env: Env, campaign_id: u64, caller: Address) -> bool {
        let config = storage::load_campaign_config(&env, campaign_id);
        require_caller(&env, &config.owner, &caller);

        let mut state = storage::load_campaign_state(&env, campaign_id);
        state.paused = !state.paused;
        storage::save_campaign_state(&env, campaign_id, &state);
        state.paused
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Withdraw the entire balance to the owner. Owner-only; the campaign
    /// must be `Funded` and hold a non-zero balance.
    ///
    /// The balance is zeroed before the outbound transfer; a failed transfer
    /// panics and the host rolls the zeroing back.
    pub fn withdraw(env: Env, campaign_id: u64, caller: Address) {
        let config = storage::load_campaign_config(&env, campaign_id);
        require_caller(&env, &config.owner, &caller);

        let mut state = storage::load_campaign_state(&env, campaign_id);
        status::sync_status(&env, campaign_id, &mut state, config.goal);
        if state.status != CampaignStatus::Funded {
            panic_with_error!(&env, Error::CampaignNotSuccessful);
        }
        if state.balance == 0 {
            panic_with_error!(&env, Error::NoBalanceToWithdraw);
        }

        let amount = state.balance;
        state.balance = 0;
        storage::save_campaign_state(&env, campaign_id, &state);

        let token_client = token::Client::new(&env, &storage::get_funding_token(&env));
        if token_client
            .try_transfer(&env.current_contract_address(), &config.owner, &amount)
            .is_err()
        {
            panic_with_error!(&env, Error::TransferFailed);
        }

        events::funds_withdrawn(
            &env,
            events::FundsWithdrawn {
                campaign_id,
                amount,
            },
        );
    }

    /// Refund the caller's entire recorded donation. Any patron; the
    /// campaign must be `Failed` and the caller's donation non-zero.
    ///
    /// The patron's total is zeroed before the outbound transfer; a failed
    /// transfer panics and the host rolls the zeroing back.
    pub fn refund(env: Env, campaign_id: u64, patron: Address) {
        patron.require_auth();

        let config = storage::load_campaign_config(&env, campaign_id);
        let mut state = storage::load_campaign_state(&env, campaign_id);
        status::sync_status(&env, campaign_id, &mut state, config.goal);
        if state.status != CampaignStatus::Failed {
            panic_with_error!(&env, Error::RefundNotAvailable);
        }

        let mut record = storage::load_patron(&env, campaign_id, &patron);
        if record.total_donation == 0 {
            panic_with_error!(&env, Error::NothingToRefund);
        }

        let amount = record.total_donation;
        record.total_donation = 0;
        storage::save_patron(&env, campaign_id, &patron, &record);

        state.balance -= amount;
        storage::save_campaign_state(&env, campaign_id, &state);

        let token_client = token::Client::new(&env, &storage::get_funding_token(&env));
        if token_client
            .try_transfer(&env.current_contract_address(), &patron, &amount)
            .is_err()
        {
            panic_with_error!(&env, Error::TransferFailed);
        }

        events::refund_issued(
            &env,
            events::RefundIssued {
                campaign_id,
                patron,
                amount,
            },
        );
    }

    /// Push the deadline out by `days` days. Owner-only; the campaign must
    /// still be `Active` after re-sync.
    pub fn extend_deadline(env: Env, campaign_id: u64, caller: Address, days: u64) {
        let config = storage::load_campaign_config(&env, campaign_id);
        require_caller(&env, &config.owner, &caller);

        let mut state = storage::load_campaign_state(&env, campaign_id);
        status::sync_status(&env, campaign_id, &mut state, config.goal);
        if state.status != CampaignStatus::Active {
            panic_with_error!(&env, Error::CampaignNotActive);
        }

        state.deadline += days * SECONDS_PER_DAY;
        storage::save_campaign_state(&env, campaign_id, &state);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Current status as a pure projection of balance and ledger time.
    ///
    /// Does not persist the derived status; stored state is only advanced by
    /// mutating entry points.
    pub fn get_status(env: Env, campaign_id: u64) -> CampaignStatus {
        let config = storage::load_campaign_config(&env, campaign_id);
        let state = storage::load_campaign_state(&env, campaign_id);
        status::derive_status(
            &state.status,
            state.balance,
            config.goal,
            env.ledger().timestamp(),
            state.deadline,
        )
    }

    /// Current balance of un-refunded, un-withdrawn pledges.
    pub fn get_balance(env: Env, campaign_id: u64) -> i128 {
        storage::load_campaign_state(&env, campaign_id).balance
    }

    /// The caller-visible pledge accounting for one patron. Returns a zeroed
    /// record for patrons who never pledged.
    pub fn get_patron_record(env: Env, campaign_id: u64, patron: Address) -> PatronRecord {
        // Fail on unknown campaigns rather than returning an empty record.
        storage::load_campaign_config(&env, campaign_id);
        storage::load_patron(&env, campaign_id, &patron)
    }
}
