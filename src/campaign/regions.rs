//! Regional summaries for campaign planning

use crate::core::types::{Country, PartyId, Region};
use crate::data::constituencies::{constituency_catalog, Constituency};
use crate::data::parties;
use crate::state::WorldState;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Aggregate view of one region's electoral landscape.
#[derive(Debug, Clone)]
pub struct RegionSummary {
    pub region: Region,
    pub country: Country,
    pub seats: usize,
    /// Mean baseline lean per party across the region's seats
    pub average_lean: BTreeMap<PartyId, f64>,
    pub targeted: bool,
}

/// Summarize every region: seat counts, averaged leans, targeting state.
pub fn region_summaries(state: &WorldState) -> Vec<RegionSummary> {
    Region::ALL
        .into_iter()
        .map(|region| {
            let seats: Vec<&Constituency> = constituency_catalog()
                .iter()
                .filter(|c| c.region == region)
                .collect();

            let mut totals: BTreeMap<PartyId, f64> = BTreeMap::new();
            for seat in &seats {
                for (&party, &share) in &seat.lean {
                    *totals.entry(party).or_insert(0.0) += share;
                }
            }
            let count = seats.len();
            let average_lean = totals
                .into_iter()
                .map(|(party, total)| {
                    (party, (total / count as f64 * 1000.0).round() / 1000.0)
                })
                .collect();

            RegionSummary {
                region,
                country: region.country(),
                seats: count,
                average_lean,
                targeted: state.campaign_targets.contains(&region),
            }
        })
        .collect()
}

/// The most swing-sensitive seats in a region, best targets first.
pub fn marginal_seats(region: Region, count: usize) -> Vec<&'static Constituency> {
    let mut seats: Vec<&'static Constituency> = constituency_catalog()
        .iter()
        .filter(|c| c.region == region)
        .collect();
    seats.sort_by_key(|c| std::cmp::Reverse(OrderedFloat(c.marginality)));
    seats.truncate(count);
    seats
}

/// Regions the player's party is allowed to campaign in.
///
/// Country-locked parties stay inside their country; everyone else can
/// go anywhere except Northern Ireland, which has its own party system.
pub fn targetable_regions(state: &WorldState) -> Vec<Region> {
    let home = parties::party(state.player_party).and_then(|p| p.country);
    Region::ALL
        .into_iter()
        .filter(|region| match home {
            Some(country) => region.country() == country,
            None => region.country() != Country::NorthernIreland,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries_cover_all_regions() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let summaries = region_summaries(&state);
        assert_eq!(summaries.len(), Region::ALL.len());
        let total: usize = summaries.iter().map(|s| s.seats).sum();
        assert_eq!(total, crate::data::constituencies::CONTESTED_SEATS);
    }

    #[test]
    fn test_marginal_seats_ranked() {
        let seats = marginal_seats(Region::SouthEast, 20);
        assert_eq!(seats.len(), 20);
        for pair in seats.windows(2) {
            assert!(pair[0].marginality >= pair[1].marginality);
        }
    }

    #[test]
    fn test_gb_party_cannot_target_northern_ireland() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let regions = targetable_regions(&state);
        assert!(!regions.contains(&Region::NorthernIreland));
        assert!(regions.contains(&Region::Scotland));
    }

    #[test]
    fn test_locked_party_stays_home() {
        let state = WorldState::new(PartyId::Snp, "Test");
        let regions = targetable_regions(&state);
        assert_eq!(regions, vec![Region::Scotland]);
    }
}
