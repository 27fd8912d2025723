//! Governing-phase integration tests: bills, divisions, PMQs, saves

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use westminster::core::types::{Ideology, PartyId, PmqStrategy};
use westminster::data::parties;
use westminster::engine;
use westminster::events::{self, EventDeck};
use westminster::persist::SaveStore;
use westminster::state::{Bill, BillStatus, WorldState};

#[test]
fn test_government_bill_through_the_house() {
    let mut state = WorldState::new(PartyId::Lab, "Whip");
    state.unity = 100.0;
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let id = engine::create_bill(&mut state, "Employment Rights Act 2024", "Workers' rights.", None)
        .unwrap();
    let vote = engine::advance_bill(&mut state, id, &mut rng).unwrap();

    // A united government whipping its own platform wins comfortably
    assert!(vote.passed);
    let government = vote.breakdown[&PartyId::Lab];
    assert!(government.noes <= 5, "{} rebels at full unity", government.noes);
    assert_eq!(state.bill_history.len(), 1);
    assert_eq!(state.bill_history[0].status, BillStatus::Passed);
}

#[test]
fn test_abstentionists_abstain_on_every_bill() {
    let state = WorldState::new(PartyId::Lab, "Teller");
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    for (proposer, position) in [
        (PartyId::Lab, [20.0; 7]),
        (PartyId::Con, [80.0; 7]),
        (PartyId::Sf, [10.0; 7]),
    ] {
        let bill = Bill::new("Test", "", proposer, Ideology::complete(position), 0);
        let vote = engine::calculate_division(&bill, &state, &mut rng);
        let sf = vote.breakdown[&PartyId::Sf];
        assert!(sf.abstained);
        assert_eq!((sf.ayes, sf.noes), (0, 0));
        assert_eq!(vote.abstentions, state.seats_of(PartyId::Sf));
    }
}

#[test]
fn test_hostile_opposition_bill_fails_against_a_majority() {
    // Labour majority government; a fringe proposer tables a bill far
    // from the government's platform
    let state = WorldState::new(PartyId::Con, "Divider");
    let bill = Bill::new(
        "Radical Restructuring Act",
        "Sweeping changes.",
        PartyId::Green,
        Ideology::complete([100.0; 7]),
        0,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let vote = engine::calculate_division(&bill, &state, &mut rng);

    assert!(!vote.passed);
    // The government was not whipped for it: only the maverick floor voted aye
    let government = vote.breakdown[&PartyId::Lab];
    assert!(government.ayes < government.seats / 10);
}

#[test]
fn test_division_determinism_across_identical_states() {
    let state = WorldState::new(PartyId::Lab, "Replay");
    let ideology = parties::party(PartyId::Con).unwrap().ideology.clone();
    let bill = Bill::new("Replayed Act", "", PartyId::Con, ideology, 0);

    let mut rng_a = ChaCha8Rng::seed_from_u64(77);
    let mut rng_b = ChaCha8Rng::seed_from_u64(77);
    assert_eq!(
        engine::calculate_division(&bill, &state, &mut rng_a),
        engine::calculate_division(&bill, &state, &mut rng_b)
    );
}

#[test]
fn test_pmqs_and_events_keep_scalars_in_range() {
    let mut state = WorldState::new(PartyId::Lab, "Performer");
    let mut deck = EventDeck::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for round in 0..40 {
        let strategy = match round % 4 {
            0 => PmqStrategy::Attack,
            1 => PmqStrategy::Defend,
            2 => PmqStrategy::Pivot,
            _ => PmqStrategy::Humour,
        };
        engine::hold_pmqs(&mut state, strategy, &mut rng).unwrap();

        let event = deck.draw(state.player_party, &mut rng);
        events::apply_choice(&mut state, &event, 0).unwrap();

        assert!((0.0..=100.0).contains(&state.approval));
        assert!((0.0..=100.0).contains(&state.unity));
        assert!(state.check_invariants().is_ok());
    }
    assert_eq!(state.event_log.len(), 40);
}

#[test]
fn test_save_load_preserves_a_mid_game() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = SaveStore::new(dir.path()).unwrap();

    let mut state = WorldState::new(PartyId::Green, "Archivist");
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    for _ in 0..18 {
        engine::advance_turn(&mut state, &mut rng).unwrap();
    }
    engine::create_bill(&mut state, "Archived Act", "", None).unwrap();
    store.save(2, &state).unwrap();

    let loaded = store.load(2).unwrap();
    assert_eq!(loaded.turn, 18);
    assert_eq!(loaded.bills.len(), 1);
    assert_eq!(loaded.bills[0].title, "Archived Act");
    assert_eq!(loaded.polling, state.polling);
    assert_eq!(loaded.policy, state.policy);

    // The loaded game keeps playing
    let mut rng2 = ChaCha8Rng::seed_from_u64(22);
    let mut resumed = loaded;
    engine::advance_turn(&mut resumed, &mut rng2).unwrap();
    assert_eq!(resumed.turn, 19);
}

#[test]
fn test_campaign_blocks_house_business() {
    let mut state = WorldState::new(PartyId::Lab, "Recess");
    state.turns_in_parliament = 20;
    engine::call_election(&mut state).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(2);
    assert!(engine::create_bill(&mut state, "Too Late Act", "", None).is_err());
    assert!(engine::hold_pmqs(&mut state, PmqStrategy::Defend, &mut rng).is_err());
    assert!(engine::advance_turn(&mut state, &mut rng).is_err());

    // Running the election restores normal business
    engine::run_election(&mut state).unwrap();
    assert!(engine::create_bill(&mut state, "New Session Act", "", None).is_ok());
}
