//! The party catalog
//!
//! Eleven parties contest Westminster elections in this model. Each has a
//! fixed ideology vector, a set of home regions where it outperforms its
//! national swing, and optionally a country it cannot contest outside of.
//! Figures are a stylized snapshot of the 2024 general election.

use crate::core::types::{Country, Ideology, PartyId, Region};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Static definition of a party. Immutable after load.
#[derive(Debug, Clone)]
pub struct Party {
    pub id: PartyId,
    pub name: &'static str,
    pub short: &'static str,
    pub leader: &'static str,
    /// Platform across all seven policy axes
    pub ideology: Ideology,
    /// Regions where the party's swing is amplified
    pub home_regions: &'static [Region],
    /// If set, the party cannot contest seats outside this country
    pub country: Option<Country>,
    /// Members hold their seats but never vote in divisions
    pub abstentionist: bool,
}

fn build_catalog() -> Vec<Party> {
    use Region::*;
    vec![
        Party {
            id: PartyId::Con,
            name: "Conservative",
            short: "Con",
            leader: "Kemi Badenoch",
            ideology: Ideology::complete([70.0, 72.0, 55.0, 70.0, 60.0, 75.0, 70.0]),
            home_regions: &[SouthEast, SouthWest, EastOfEngland, EastMidlands],
            country: None,
            abstentionist: false,
        },
        Party {
            id: PartyId::Lab,
            name: "Labour",
            short: "Lab",
            leader: "Keir Starmer",
            ideology: Ideology::complete([35.0, 35.0, 25.0, 45.0, 35.0, 45.0, 35.0]),
            home_regions: &[NorthEast, NorthWest, YorkshireHumber, London, Wales],
            country: None,
            abstentionist: false,
        },
        Party {
            id: PartyId::Lib,
            name: "Liberal Democrats",
            short: "Lib Dem",
            leader: "Ed Davey",
            ideology: Ideology::complete([45.0, 40.0, 30.0, 25.0, 25.0, 35.0, 25.0]),
            home_regions: &[SouthWest, SouthEast, London],
            country: None,
            abstentionist: false,
        },
        Party {
            id: PartyId::Snp,
            name: "Scottish National Party",
            short: "SNP",
            leader: "John Swinney",
            ideology: Ideology::complete([30.0, 30.0, 20.0, 25.0, 25.0, 30.0, 5.0]),
            home_regions: &[Scotland],
            country: Some(Country::Scotland),
            abstentionist: false,
        },
        Party {
            id: PartyId::Reform,
            name: "Reform UK",
            short: "Reform",
            leader: "Nigel Farage",
            ideology: Ideology::complete([80.0, 85.0, 65.0, 95.0, 85.0, 85.0, 75.0]),
            home_regions: &[EastOfEngland, EastMidlands, NorthEast, YorkshireHumber],
            country: None,
            abstentionist: false,
        },
        Party {
            id: PartyId::Green,
            name: "Green Party",
            short: "Green",
            leader: "Carla Denyer",
            ideology: Ideology::complete([15.0, 15.0, 10.0, 15.0, 5.0, 15.0, 20.0]),
            home_regions: &[London, SouthEast, SouthWest],
            country: None,
            abstentionist: false,
        },
        Party {
            id: PartyId::Plaid,
            name: "Plaid Cymru",
            short: "Plaid",
            leader: "Rhun ap Iorwerth",
            ideology: Ideology::complete([25.0, 25.0, 20.0, 30.0, 20.0, 25.0, 5.0]),
            home_regions: &[Wales],
            country: Some(Country::Wales),
            abstentionist: false,
        },
        Party {
            id: PartyId::Dup,
            name: "Democratic Unionist Party",
            short: "DUP",
            leader: "Gavin Robinson",
            ideology: Ideology::complete([55.0, 55.0, 40.0, 70.0, 60.0, 80.0, 40.0]),
            home_regions: &[NorthernIreland],
            country: Some(Country::NorthernIreland),
            abstentionist: false,
        },
        Party {
            id: PartyId::Sf,
            name: "Sinn Féin",
            short: "SF",
            leader: "Mary Lou McDonald",
            ideology: Ideology::complete([20.0, 20.0, 15.0, 30.0, 25.0, 20.0, 5.0]),
            home_regions: &[NorthernIreland],
            country: Some(Country::NorthernIreland),
            abstentionist: true,
        },
        Party {
            id: PartyId::Sdlp,
            name: "SDLP",
            short: "SDLP",
            leader: "Claire Hanna",
            ideology: Ideology::complete([30.0, 30.0, 25.0, 30.0, 25.0, 30.0, 15.0]),
            home_regions: &[NorthernIreland],
            country: Some(Country::NorthernIreland),
            abstentionist: false,
        },
        Party {
            id: PartyId::Alliance,
            name: "Alliance Party",
            short: "Alliance",
            leader: "Naomi Long",
            ideology: Ideology::complete([45.0, 40.0, 30.0, 30.0, 25.0, 40.0, 25.0]),
            home_regions: &[NorthernIreland],
            country: Some(Country::NorthernIreland),
            abstentionist: false,
        },
    ]
}

/// Parties the player can lead.
pub const PLAYABLE: [PartyId; 7] = [
    PartyId::Con,
    PartyId::Lab,
    PartyId::Lib,
    PartyId::Snp,
    PartyId::Reform,
    PartyId::Green,
    PartyId::Plaid,
];

static CATALOG: OnceLock<Vec<Party>> = OnceLock::new();

/// All competitive parties, canonical order.
pub fn all_parties() -> &'static [Party] {
    CATALOG.get_or_init(build_catalog)
}

/// Look up one party. Returns None for the non-partisan buckets.
pub fn party(id: PartyId) -> Option<&'static Party> {
    all_parties().iter().find(|p| p.id == id)
}

/// Seats won at the 2024 general election (the starting Parliament).
pub fn baseline_seats() -> HashMap<PartyId, u32> {
    HashMap::from([
        (PartyId::Con, 121),
        (PartyId::Lab, 412),
        (PartyId::Lib, 72),
        (PartyId::Snp, 9),
        (PartyId::Reform, 5),
        (PartyId::Green, 4),
        (PartyId::Plaid, 4),
        (PartyId::Dup, 5),
        (PartyId::Sf, 7),
        (PartyId::Sdlp, 2),
        (PartyId::Alliance, 1),
        (PartyId::Ind, 6),
        (PartyId::Speaker, 1),
        (PartyId::Other, 1),
    ])
}

/// National vote share at the 2024 general election (percent).
///
/// This is both the polling starting point and the long-run baseline
/// the polling model reverts toward. The Speaker has no polling entry.
pub fn baseline_polling() -> HashMap<PartyId, f64> {
    HashMap::from([
        (PartyId::Con, 23.7),
        (PartyId::Lab, 33.7),
        (PartyId::Lib, 12.2),
        (PartyId::Snp, 2.5),
        (PartyId::Reform, 14.3),
        (PartyId::Green, 6.7),
        (PartyId::Plaid, 0.7),
        (PartyId::Dup, 0.6),
        (PartyId::Sf, 0.7),
        (PartyId::Sdlp, 0.3),
        (PartyId::Alliance, 0.2),
        (PartyId::Other, 4.4),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::HOUSE_SIZE;

    #[test]
    fn test_catalog_covers_competitive_set() {
        for id in PartyId::COMPETITIVE {
            assert!(party(id).is_some(), "missing catalog entry for {}", id);
        }
        assert!(party(PartyId::Speaker).is_none());
        assert!(party(PartyId::Other).is_none());
    }

    #[test]
    fn test_baseline_seats_fill_the_house() {
        let total: u32 = baseline_seats().values().sum();
        assert_eq!(total, HOUSE_SIZE);
    }

    #[test]
    fn test_baseline_polling_sums_to_hundred() {
        let total: f64 = baseline_polling().values().sum();
        assert!((total - 100.0).abs() < 1e-9, "total was {total}");
    }

    #[test]
    fn test_country_locks() {
        assert_eq!(party(PartyId::Snp).unwrap().country, Some(Country::Scotland));
        assert_eq!(party(PartyId::Plaid).unwrap().country, Some(Country::Wales));
        assert_eq!(party(PartyId::Lab).unwrap().country, None);
    }

    #[test]
    fn test_only_sinn_fein_abstains() {
        let abstainers: Vec<_> = all_parties()
            .iter()
            .filter(|p| p.abstentionist)
            .map(|p| p.id)
            .collect();
        assert_eq!(abstainers, vec![PartyId::Sf]);
    }

    #[test]
    fn test_ideologies_are_total() {
        use crate::core::types::PolicyAxis;
        for p in all_parties() {
            for axis in PolicyAxis::ALL {
                assert!(p.ideology.get(axis).is_some(), "{} missing {:?}", p.id, axis);
            }
        }
    }
}
