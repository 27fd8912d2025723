//! Election calculator
//!
//! Projects national polling swing onto every constituency and scores a
//! full first-past-the-post general election. There is no randomness in
//! here: all noise lives upstream in the polling model, so a given
//! polling table always produces the same Parliament.

use crate::core::config::config;
use crate::core::types::{Country, PartyId, Region};
use crate::data::constituencies::{constituency_catalog, CONTESTED_SEATS};
use crate::data::parties;
use crate::state::WorldState;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Outcome in a single constituency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyResult {
    pub name: String,
    pub region: Region,
    pub winner: PartyId,
    pub runner_up: PartyId,
    /// Winner's share minus the runner-up's
    pub margin: f64,
    pub votes: BTreeMap<PartyId, f64>,
}

/// Full national result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResult {
    pub seats: HashMap<PartyId, u32>,
    /// Every contest, sorted tightest race first
    pub constituencies: Vec<ConstituencyResult>,
}

/// Swing damping by country; London amplifies the national trend.
fn region_factor(region: Region, country: Country) -> f64 {
    match country {
        Country::Scotland => 0.7,
        Country::NorthernIreland => 0.3,
        Country::Wales => 0.85,
        Country::England => {
            if region == Region::London {
                1.1
            } else {
                1.0
            }
        }
    }
}

/// Pick winner and runner-up from a vote table.
///
/// Scanning in canonical order with a strict comparison means ties go to
/// the earlier party, and an empty or all-zero table resolves to the
/// Other bucket - a seat is never left unassigned.
fn fptp_winner(votes: &BTreeMap<PartyId, f64>) -> (PartyId, f64, PartyId, f64) {
    let mut winner = PartyId::Other;
    let mut winner_vote = 0.0;
    let mut runner_up = PartyId::Other;
    let mut runner_up_vote = 0.0;

    for (&party, &vote) in votes {
        if vote > winner_vote {
            runner_up = winner;
            runner_up_vote = winner_vote;
            winner = party;
            winner_vote = vote;
        } else if vote > runner_up_vote {
            runner_up = party;
            runner_up_vote = vote;
        }
    }

    (winner, winner_vote, runner_up, runner_up_vote)
}

/// Score a general election from current polling against the baseline
/// captured at the previous election.
pub fn calculate_election(state: &WorldState) -> ElectionResult {
    let tuning = config();

    // National swing per party since the last election
    let mut swings: HashMap<PartyId, f64> = HashMap::new();
    for id in PartyId::COMPETITIVE {
        let now = state.polling_of(id);
        let then = state
            .last_election_polling
            .get(&id)
            .copied()
            .unwrap_or(0.0);
        swings.insert(id, now - then);
    }

    let mut seats: HashMap<PartyId, u32> = PartyId::ALL.iter().map(|&p| (p, 0)).collect();
    seats.insert(PartyId::Speaker, 1);

    let mut results = Vec::with_capacity(CONTESTED_SEATS);

    for seat in constituency_catalog() {
        let damping = region_factor(seat.region, seat.country);
        let marginal_boost = 1.0 + seat.marginality * tuning.marginality_swing;
        let mut votes: BTreeMap<PartyId, f64> = BTreeMap::new();

        for id in PartyId::COMPETITIVE {
            let mut base = seat.lean.get(&id).copied().unwrap_or(0.0);
            let mut swing = swings.get(&id).copied().unwrap_or(0.0) / 100.0 * damping;

            if let Some(party) = parties::party(id) {
                if party.home_regions.contains(&seat.region) {
                    swing *= tuning.home_region_swing;
                }
                // Nationalist parties cannot contest outside their nation
                if let Some(country) = party.country {
                    if country != seat.country {
                        base = 0.0;
                        swing = 0.0;
                    }
                }
            }

            swing *= marginal_boost;

            if base == 0.0 && swing == 0.0 {
                continue;
            }
            votes.insert(id, (base + swing).max(0.0));
        }

        // Unaccounted vote goes to minor parties and independents
        let total: f64 = votes.values().sum();
        if total < tuning.residual_threshold {
            *votes.entry(PartyId::Other).or_insert(0.0) += (1.0 - total) * 0.5;
        }

        let (winner, winner_vote, runner_up, runner_up_vote) = fptp_winner(&votes);
        *seats.entry(winner).or_insert(0) += 1;

        results.push(ConstituencyResult {
            name: seat.name.clone(),
            region: seat.region,
            winner,
            runner_up,
            margin: winner_vote - runner_up_vote,
            votes,
        });
    }

    // Tightest races first
    results.sort_by_key(|r| OrderedFloat(r.margin));

    ElectionResult {
        seats,
        constituencies: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::HOUSE_SIZE;

    #[test]
    fn test_seat_conservation() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let result = calculate_election(&state);
        let total: u32 = result.seats.values().sum();
        assert_eq!(total, HOUSE_SIZE);
        assert_eq!(result.constituencies.len(), CONTESTED_SEATS);
    }

    #[test]
    fn test_speaker_seat_is_fixed() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let result = calculate_election(&state);
        assert_eq!(result.seats[&PartyId::Speaker], 1);
        assert!(result
            .constituencies
            .iter()
            .all(|c| c.winner != PartyId::Speaker));
    }

    #[test]
    fn test_deterministic_given_identical_polling() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let a = calculate_election(&state);
        let b = calculate_election(&state);
        assert_eq!(a, b);
    }

    #[test]
    fn test_country_locked_parties_win_nothing_abroad() {
        let mut state = WorldState::new(PartyId::Snp, "Test");
        // Even on an absurd surge, the SNP cannot take seats outside
        // Scotland
        state.polling.insert(PartyId::Snp, 45.0);
        state.normalize_polling();
        let result = calculate_election(&state);
        for contest in &result.constituencies {
            if contest.winner == PartyId::Snp {
                assert_eq!(contest.region, Region::Scotland, "SNP won {}", contest.name);
            }
            if contest.region != Region::Scotland {
                assert_eq!(contest.votes.get(&PartyId::Snp), None);
            }
        }
    }

    #[test]
    fn test_results_sorted_tightest_first() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let result = calculate_election(&state);
        for pair in result.constituencies.windows(2) {
            assert!(pair[0].margin <= pair[1].margin);
        }
    }

    #[test]
    fn test_margins_are_consistent() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let result = calculate_election(&state);
        for contest in &result.constituencies {
            let winner_vote = contest.votes.get(&contest.winner).copied().unwrap_or(0.0);
            let runner_vote = contest.votes.get(&contest.runner_up).copied().unwrap_or(0.0);
            assert!(winner_vote >= runner_vote);
            assert!(contest.margin >= 0.0);
        }
    }

    #[test]
    fn test_empty_contest_falls_to_other() {
        let (winner, winner_vote, runner_up, _) = fptp_winner(&BTreeMap::new());
        assert_eq!(winner, PartyId::Other);
        assert_eq!(winner_vote, 0.0);
        assert_eq!(runner_up, PartyId::Other);

        let all_zero = BTreeMap::from([(PartyId::Con, 0.0), (PartyId::Lab, 0.0)]);
        let (winner, _, _, _) = fptp_winner(&all_zero);
        assert_eq!(winner, PartyId::Other);
    }

    #[test]
    fn test_tied_contest_goes_to_canonical_order() {
        let tied = BTreeMap::from([(PartyId::Lab, 0.4), (PartyId::Con, 0.4)]);
        let (winner, _, runner_up, _) = fptp_winner(&tied);
        assert_eq!(winner, PartyId::Con);
        assert_eq!(runner_up, PartyId::Lab);
    }

    #[test]
    fn test_landslide_swing_flips_seats() {
        let mut state = WorldState::new(PartyId::Con, "Test");
        // Baseline Parliament, then a huge move to the Conservatives
        state.polling.insert(PartyId::Con, 45.0);
        state.polling.insert(PartyId::Lab, 20.0);
        state.normalize_polling();

        let swung = calculate_election(&state);

        let mut level = WorldState::new(PartyId::Con, "Test");
        level.polling = level.last_election_polling.clone();
        let steady = calculate_election(&level);

        let con_before = steady.seats[&PartyId::Con];
        let con_after = swung.seats[&PartyId::Con];
        assert!(
            con_after > con_before + 100,
            "swing only moved {con_before} -> {con_after}"
        );
        assert!(swung.seats[&PartyId::Lab] < steady.seats[&PartyId::Lab]);

        // Gains should be concentrated where the swing is amplified:
        // more than half of Conservative wins sit in home regions or
        // marginal seats
        let home: Vec<Region> = parties::party(PartyId::Con).unwrap().home_regions.to_vec();
        let wins: Vec<_> = swung
            .constituencies
            .iter()
            .filter(|c| c.winner == PartyId::Con)
            .collect();
        let in_home = wins.iter().filter(|c| home.contains(&c.region)).count();
        assert!(in_home * 3 > wins.len(), "home-region share too small");
    }
}
