//! Property tests for the core state invariants

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use westminster::core::types::{PartyId, HOUSE_SIZE};
use westminster::engine;
use westminster::state::{EffectDelta, WorldState};

proptest! {
    /// Whatever perturbation hits the polling table, one normalization
    /// restores the 100-point total and the positive floor.
    #[test]
    fn polling_normalization_is_restorative(
        factors in proptest::collection::vec(0.01f64..5.0, PartyId::COMPETITIVE.len())
    ) {
        let mut state = WorldState::new(PartyId::Lab, "Prop");
        for (id, factor) in PartyId::COMPETITIVE.into_iter().zip(factors) {
            if let Some(value) = state.polling.get_mut(&id) {
                *value *= factor;
            }
        }
        state.normalize_polling();

        let total: f64 = state.polling.values().sum();
        prop_assert!((total - 100.0).abs() < 2.0, "total {}", total);
        for (&id, &value) in &state.polling {
            prop_assert!(value > 0.0, "{} at {}", id, value);
        }
    }

    /// Arbitrary effect deltas can never push the clamped scalars out of
    /// range or resources below zero.
    #[test]
    fn effects_respect_scalar_ranges(
        approval in -200.0f64..200.0,
        unity in -200.0f64..200.0,
        funds in -100_000i64..100_000,
        activists in -100_000i64..100_000,
    ) {
        let mut state = WorldState::new(PartyId::Con, "Prop");
        state.apply_effects(&EffectDelta {
            approval,
            unity,
            funds,
            activists,
            polling: Default::default(),
        });
        prop_assert!((0.0..=100.0).contains(&state.approval));
        prop_assert!((0.0..=100.0).contains(&state.unity));
        prop_assert!(state.party_funds >= 0);
        prop_assert!(state.activists >= 0);
    }

    /// Elections conserve the house size from any polling table.
    #[test]
    fn elections_conserve_seats(
        shares in proptest::collection::vec(0.1f64..45.0, PartyId::COMPETITIVE.len()),
        seed in any::<u64>(),
    ) {
        let mut state = WorldState::new(PartyId::Lab, "Prop");
        for (id, share) in PartyId::COMPETITIVE.into_iter().zip(shares) {
            state.polling.insert(id, share);
        }
        state.normalize_polling();

        // A polling step on top, for good measure
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        engine::update_polling(&mut state, &mut rng);

        let result = engine::calculate_election(&state);
        let total: u32 = result.seats.values().sum();
        prop_assert_eq!(total, HOUSE_SIZE);
        prop_assert_eq!(result.seats[&PartyId::Speaker], 1);
    }

    /// Divisions never manufacture or lose voting members.
    #[test]
    fn divisions_conserve_voting_seats(seed in any::<u64>(), unity in 0.0f64..100.0) {
        use westminster::core::types::Ideology;
        use westminster::state::Bill;

        let mut state = WorldState::new(PartyId::Lab, "Prop");
        state.unity = unity;
        let bill = Bill::new("Prop Act", "", PartyId::Lab, Ideology::complete([50.0; 7]), 0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let vote = engine::calculate_division(&bill, &state, &mut rng);

        for (&party, votes) in &vote.breakdown {
            prop_assert_eq!(votes.seats, state.seats_of(party));
            if !votes.abstained {
                prop_assert_eq!(votes.ayes + votes.noes, votes.seats);
            }
        }
        prop_assert!(vote.passed == (vote.ayes > vote.noes));
    }
}
