//! Government formation
//!
//! Applies the majority rule to a seat result. The denominator is the
//! effective house: all seats minus the Speaker and minus any party that
//! never takes its seats.

use crate::core::types::{PartyId, HOUSE_SIZE};
use crate::data::parties;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Who governs, and on what arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernmentOutcome {
    pub pm_party: PartyId,
    pub has_majority: bool,
    /// Seats needed for a working majority of the effective house
    pub effective_majority: u32,
    pub government_seats: u32,
    pub hung_parliament: bool,
    /// Competitive parties ranked by seats won, largest first
    pub ranking: Vec<(PartyId, u32)>,
}

/// Decide who forms the government from a seat mapping.
///
/// The largest competitive party takes office. An exact tie on seats is
/// broken by canonical party order: the ranking is built in declaration
/// order and sorted with a stable sort, so the earlier-declared party
/// stays in front.
pub fn determine_government(seats: &HashMap<PartyId, u32>) -> GovernmentOutcome {
    let mut ranking: Vec<(PartyId, u32)> = PartyId::COMPETITIVE
        .into_iter()
        .map(|id| (id, seats.get(&id).copied().unwrap_or(0)))
        .collect();
    ranking.sort_by_key(|&(_, count)| std::cmp::Reverse(count));

    let (pm_party, government_seats) = ranking[0];

    let abstaining: u32 = parties::all_parties()
        .iter()
        .filter(|p| p.abstentionist)
        .map(|p| seats.get(&p.id).copied().unwrap_or(0))
        .sum();

    let effective_house = HOUSE_SIZE - abstaining - 1;
    let effective_majority = effective_house / 2 + 1;
    let has_majority = government_seats >= effective_majority;

    GovernmentOutcome {
        pm_party,
        has_majority,
        effective_majority,
        government_seats,
        hung_parliament: !has_majority,
        ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_arithmetic() {
        // 340 + 200 + 109 + Speaker, no abstentionists: the effective
        // house is 649 and the threshold 325
        let seats = HashMap::from([
            (PartyId::Con, 340),
            (PartyId::Lab, 200),
            (PartyId::Other, 109),
            (PartyId::Speaker, 1),
        ]);
        let outcome = determine_government(&seats);
        assert_eq!(outcome.effective_majority, 325);
        assert_eq!(outcome.pm_party, PartyId::Con);
        assert_eq!(outcome.government_seats, 340);
        assert!(outcome.has_majority);
        assert!(!outcome.hung_parliament);
    }

    #[test]
    fn test_abstentionists_shrink_the_house() {
        // Seven Sinn Féin seats never vote: effective house 642,
        // threshold 322
        let seats = HashMap::from([
            (PartyId::Lab, 322),
            (PartyId::Con, 320),
            (PartyId::Sf, 7),
            (PartyId::Speaker, 1),
        ]);
        let outcome = determine_government(&seats);
        assert_eq!(outcome.effective_majority, 322);
        assert!(outcome.has_majority);
    }

    #[test]
    fn test_hung_parliament() {
        let seats = HashMap::from([
            (PartyId::Lab, 300),
            (PartyId::Con, 290),
            (PartyId::Lib, 59),
            (PartyId::Speaker, 1),
        ]);
        let outcome = determine_government(&seats);
        assert_eq!(outcome.pm_party, PartyId::Lab);
        assert!(!outcome.has_majority);
        assert!(outcome.hung_parliament);
    }

    #[test]
    fn test_tie_breaks_by_canonical_order() {
        // Con and Lab dead level: Con is declared first and takes it
        let seats = HashMap::from([
            (PartyId::Lab, 300),
            (PartyId::Con, 300),
            (PartyId::Lib, 49),
            (PartyId::Speaker, 1),
        ]);
        let outcome = determine_government(&seats);
        assert_eq!(outcome.pm_party, PartyId::Con);

        // And the ranking preserves the same order
        assert_eq!(outcome.ranking[0].0, PartyId::Con);
        assert_eq!(outcome.ranking[1].0, PartyId::Lab);
    }

    #[test]
    fn test_buckets_never_govern() {
        // A pile of independents outnumbering every party still cannot
        // form a government
        let seats = HashMap::from([
            (PartyId::Ind, 400),
            (PartyId::Lab, 150),
            (PartyId::Con, 99),
            (PartyId::Speaker, 1),
        ]);
        let outcome = determine_government(&seats);
        assert_eq!(outcome.pm_party, PartyId::Lab);
        assert!(outcome.hung_parliament);
    }

    #[test]
    fn test_ranking_covers_all_competitive_parties() {
        let seats = HashMap::from([(PartyId::Lab, 649), (PartyId::Speaker, 1)]);
        let outcome = determine_government(&seats);
        assert_eq!(outcome.ranking.len(), PartyId::COMPETITIVE.len());
        assert_eq!(outcome.ranking[0], (PartyId::Lab, 649));
    }
}
