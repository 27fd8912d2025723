//! Division calculator
//!
//! Simulates one Commons division: whipped benches with unity-scaled
//! rebellion, opposition benches voting on ideological alignment, and
//! abstentionists sitting the vote out. A little bounded noise per party
//! keeps identical bills from producing identical tallies.

use crate::core::config::config;
use crate::core::types::PartyId;
use crate::data::parties;
use crate::state::{Bill, DivisionResult, PartyVotes, WorldState};
use rand::Rng;
use std::collections::BTreeMap;

/// Score a division on `bill` against the current Parliament.
///
/// Whipping only binds government benches on government business: a bill
/// brought by the opposition is judged on alignment even by the party in
/// power. The Speaker never votes, and parties with no seats do not
/// appear in the breakdown.
pub fn calculate_division(bill: &Bill, state: &WorldState, rng: &mut impl Rng) -> DivisionResult {
    let tuning = config();
    let mut ayes = 0u32;
    let mut noes = 0u32;
    let mut abstentions = 0u32;
    let mut breakdown = BTreeMap::new();

    let government_business = state.in_government(bill.proposer);

    for id in PartyId::COMPETITIVE {
        let Some(party) = parties::party(id) else {
            continue;
        };
        let seats = state.seats_of(id);
        if seats == 0 {
            continue;
        }

        if party.abstentionist {
            abstentions += seats;
            breakdown.insert(
                id,
                PartyVotes {
                    seats,
                    ayes: 0,
                    noes: 0,
                    abstained: true,
                },
            );
            continue;
        }

        let alignment = party.ideology.alignment(&bill.ideology);
        let whipped = id == bill.proposer || (state.in_government(id) && government_business);

        let base_ayes = if whipped {
            let rebel_rate = if id == bill.proposer {
                tuning.proposer_rebel_rate
            } else {
                tuning.government_rebel_rate
            };
            let unity_factor = if id == state.player_party {
                state.unity / 100.0
            } else {
                tuning.assumed_unity
            };
            let rebels = (f64::from(seats) * rebel_rate * (1.0 - unity_factor)).floor() as u32;
            seats - rebels.min(seats)
        } else if alignment > tuning.high_alignment {
            // Genuine cross-party support
            (f64::from(seats) * alignment * tuning.high_support_gain).floor() as u32
        } else if alignment > tuning.medium_alignment {
            // Mostly opposed, a supportive fraction
            (f64::from(seats) * alignment * tuning.medium_support_gain).floor() as u32
        } else {
            // Firm opposition bar a few mavericks
            (f64::from(seats) * tuning.opposition_support_floor).floor() as u32
        };

        // Bounded noise; the split always stays within [0, seats]
        let noise = rng.gen_range(-tuning.division_noise..=tuning.division_noise);
        let party_ayes = (i64::from(base_ayes) + noise).clamp(0, i64::from(seats)) as u32;
        let party_noes = seats - party_ayes;

        ayes += party_ayes;
        noes += party_noes;
        breakdown.insert(
            id,
            PartyVotes {
                seats,
                ayes: party_ayes,
                noes: party_noes,
                abstained: false,
            },
        );
    }

    DivisionResult {
        ayes,
        noes,
        abstentions,
        passed: ayes > noes,
        majority: i64::from(ayes) - i64::from(noes),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Ideology;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn government_bill(state: &WorldState) -> Bill {
        let ideology = parties::party(state.pm_party).unwrap().ideology.clone();
        Bill::new("Test Act 2024", "A test.", state.pm_party, ideology, 1)
    }

    #[test]
    fn test_abstentionists_never_vote() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let bill = government_bill(&state);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = calculate_division(&bill, &state, &mut rng);

        let sf = result.breakdown[&PartyId::Sf];
        assert!(sf.abstained);
        assert_eq!(sf.ayes, 0);
        assert_eq!(sf.noes, 0);
        assert_eq!(sf.seats, 7);
        assert_eq!(result.abstentions, 7);
    }

    #[test]
    fn test_zero_seat_parties_are_absent() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        state.seats.insert(PartyId::Sdlp, 0);
        state.seats.insert(PartyId::Other, 3); // keep the house at 650
        let bill = government_bill(&state);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = calculate_division(&bill, &state, &mut rng);
        assert!(!result.breakdown.contains_key(&PartyId::Sdlp));
    }

    #[test]
    fn test_united_government_has_clean_whip() {
        // A bill matching the governing party's own platform, proposed by
        // that party, at full unity: structural rebellion is zero and only
        // noise can produce a handful of noes
        let mut state = WorldState::new(PartyId::Lab, "Test");
        state.unity = 100.0;
        let bill = government_bill(&state);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = calculate_division(&bill, &state, &mut rng);

        let lab = result.breakdown[&PartyId::Lab];
        assert!(lab.noes <= 5, "unexpected rebellion: {} noes", lab.noes);
        assert!(result.passed);
        assert!(result.majority > 100);
    }

    #[test]
    fn test_low_unity_breeds_rebellion() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        state.unity = 10.0;
        let bill = government_bill(&state);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = calculate_division(&bill, &state, &mut rng);

        // 412 seats at 15% rebellion scaled by 0.9 is ~55 structural rebels
        let lab = result.breakdown[&PartyId::Lab];
        assert!(lab.noes >= 40, "expected a real rebellion, got {}", lab.noes);
    }

    #[test]
    fn test_hostile_opposition_bill_is_defeated() {
        // A fringe bill far from the governing party's platform: the
        // government is not whipped for opposition business, reads the
        // bill on alignment, and votes it down
        let state = WorldState::new(PartyId::Con, "Test");
        let bill = Bill::new(
            "Radical Measures Act 2024",
            "A test.",
            PartyId::Green,
            Ideology::complete([100.0; 7]),
            1,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = calculate_division(&bill, &state, &mut rng);

        assert!(!result.passed);
        let lab = result.breakdown[&PartyId::Lab];
        // Only the support floor applies to the government benches
        assert!(lab.ayes <= 30, "government lent {} ayes", lab.ayes);
        assert!(lab.noes >= 380);
    }

    #[test]
    fn test_government_only_whipped_on_government_business() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let ideology = Ideology::complete([100.0; 7]);
        let own = Bill::new("A", "", PartyId::Lab, ideology.clone(), 1);
        let hostile = Bill::new("B", "", PartyId::Green, ideology, 1);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let whipped = calculate_division(&own, &state, &mut rng);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let judged = calculate_division(&hostile, &state, &mut rng);

        // Same text, different proposer: the whip makes the difference
        assert!(whipped.breakdown[&PartyId::Lab].ayes > 350);
        assert!(judged.breakdown[&PartyId::Lab].ayes < 50);
    }

    #[test]
    fn test_contentless_bill_reads_as_neutral() {
        // No declared axes: alignment defaults to the neutral midpoint
        // and lands in the medium band rather than dividing by zero
        let state = WorldState::new(PartyId::Con, "Test");
        let bill = Bill::new("Procedural Motion", "", PartyId::Lab, Ideology::new(), 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = calculate_division(&bill, &state, &mut rng);
        // Non-whipped benches give the medium-band fraction, not zero
        let con = result.breakdown[&PartyId::Con];
        assert!(con.ayes > 0);
        assert!(con.noes > con.ayes);
    }

    #[test]
    fn test_division_is_seeded_deterministic() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let bill = government_bill(&state);
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        let a = calculate_division(&bill, &state, &mut rng_a);
        let b = calculate_division(&bill, &state, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tallies_conserve_voting_seats() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let bill = government_bill(&state);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = calculate_division(&bill, &state, &mut rng);

        for (party, votes) in &result.breakdown {
            if votes.abstained {
                assert_eq!(votes.ayes + votes.noes, 0);
            } else {
                assert_eq!(
                    votes.ayes + votes.noes,
                    votes.seats,
                    "{party} tallies do not add up"
                );
            }
        }
        let tallied: u32 = result
            .breakdown
            .values()
            .map(|v| v.ayes + v.noes + if v.abstained { v.seats } else { 0 })
            .sum();
        assert_eq!(result.ayes + result.noes + result.abstentions, tallied);
    }
}
