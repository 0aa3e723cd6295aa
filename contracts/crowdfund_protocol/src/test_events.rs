extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{
    CampaignCreated, FundsWithdrawn, PledgeMade, RefundIssued, TierAdded, TierRemoved,
};
use crate::{Campaign, CrowdfundProtocol, CrowdfundProtocolClient};

const UNIT: i128 = 10_000_000;
const DAY: u64 = 86_400;

fn setup() -> (Env, CrowdfundProtocolClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CrowdfundProtocol, ());
    let client = CrowdfundProtocolClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = sac.address();
    client.init(&admin, &token);
    (env, client, token)
}

fn create_campaign(
    env: &Env,
    client: &CrowdfundProtocolClient,
    owner: &Address,
    goal: i128,
) -> Campaign {
    client.create_campaign(
        owner,
        &String::from_str(env, "Radio Telescope"),
        &String::from_str(env, "A backyard dish for the astronomy club"),
        &goal,
        &7,
    )
}

fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

#[test]
fn test_campaign_created_event() {
    let (env, client, _) = setup();
    let owner = Address::generate(&env);

    let campaign = create_campaign(&env, &client, &owner, 5 * UNIT);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        campaign.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: campaign.id,
            owner: owner.clone(),
            goal: 5 * UNIT,
            deadline: campaign.deadline,
        }
    );
}

#[test]
fn test_tier_added_event() {
    let (env, client, _) = setup();
    let owner = Address::generate(&env);
    let campaign = create_campaign(&env, &client, &owner, 5 * UNIT);

    let tier_index = client.add_tier(
        &campaign.id,
        &owner,
        &String::from_str(&env, "Bronze"),
        &UNIT,
    );

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("tieradd").into_val(&env),
        campaign.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TierAdded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        TierAdded {
            campaign_id: campaign.id,
            tier_index,
        }
    );
}

#[test]
fn test_tier_removed_event() {
    let (env, client, _) = setup();
    let owner = Address::generate(&env);
    let campaign = create_campaign(&env, &client, &owner, 5 * UNIT);
    client.add_tier(
        &campaign.id,
        &owner,
        &String::from_str(&env, "Bronze"),
        &UNIT,
    );

    client.remove_tier(&campaign.id, &owner, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("tierdel").into_val(&env),
        campaign.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TierRemoved = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        TierRemoved {
            campaign_id: campaign.id,
            tier_index: 0,
        }
    );
}

#[test]
fn test_pledge_made_event() {
    let (env, client, token) = setup();
    let owner = Address::generate(&env);
    let patron = Address::generate(&env);
    let campaign = create_campaign(&env, &client, &owner, 5 * UNIT);
    client.add_tier(
        &campaign.id,
        &owner,
        &String::from_str(&env, "Bronze"),
        &UNIT,
    );
    mint(&env, &token, &patron, UNIT);

    client.pledge(&campaign.id, &patron, &0, &UNIT);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("pledge").into_val(&env),
        campaign.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PledgeMade = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PledgeMade {
            campaign_id: campaign.id,
            patron: patron.clone(),
            tier_index: 0,
        }
    );
}

#[test]
fn test_funds_withdrawn_event() {
    let (env, client, token) = setup();
    let owner = Address::generate(&env);
    let patron = Address::generate(&env);
    let campaign = create_campaign(&env, &client, &owner, UNIT);
    client.add_tier(
        &campaign.id,
        &owner,
        &String::from_str(&env, "Gold"),
        &UNIT,
    );
    mint(&env, &token, &patron, UNIT);
    client.pledge(&campaign.id, &patron, &0, &UNIT);

    client.withdraw(&campaign.id, &owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("withdraw").into_val(&env),
        campaign.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            campaign_id: campaign.id,
            amount: UNIT,
        }
    );
}

#[test]
fn test_refund_issued_event() {
    let (env, client, token) = setup();
    let owner = Address::generate(&env);
    let patron = Address::generate(&env);
    let campaign = create_campaign(&env, &client, &owner, 5 * UNIT);
    client.add_tier(
        &campaign.id,
        &owner,
        &String::from_str(&env, "Gold"),
        &UNIT,
    );
    mint(&env, &token, &patron, UNIT);
    client.pledge(&campaign.id, &patron, &0, &UNIT);

    env.ledger().with_mut(|li| li.timestamp += 30 * DAY);
    client.refund(&campaign.id, &patron);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refund").into_val(&env),
        campaign.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RefundIssued = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RefundIssued {
            campaign_id: campaign.id,
            patron: patron.clone(),
            amount: UNIT,
        }
    );
}
