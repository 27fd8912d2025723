//! Core identifiers and shared value types
//!
//! Everything here is part of the closed vocabulary fixed at startup:
//! the party set, the region/country map, policy axes, and game phases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Total size of the House of Commons, including the Speaker's seat.
pub const HOUSE_SIZE: u32 = 650;

/// Party identifiers.
///
/// Declaration order is the canonical party ordering: it drives display
/// order, deterministic iteration, and tie-breaks in government formation.
/// The last three variants are non-partisan buckets, not real parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyId {
    Con,
    Lab,
    Lib,
    Snp,
    Reform,
    Green,
    Plaid,
    Dup,
    Sf,
    Sdlp,
    Alliance,
    /// Independent members - hold seats, never contest nationally
    Ind,
    /// The Speaker's seat, never contested
    Speaker,
    /// Residual bucket for minor parties and locally strong candidates
    Other,
}

impl PartyId {
    /// Every id that can appear in a seats mapping, canonical order.
    pub const ALL: [PartyId; 14] = [
        PartyId::Con,
        PartyId::Lab,
        PartyId::Lib,
        PartyId::Snp,
        PartyId::Reform,
        PartyId::Green,
        PartyId::Plaid,
        PartyId::Dup,
        PartyId::Sf,
        PartyId::Sdlp,
        PartyId::Alliance,
        PartyId::Ind,
        PartyId::Speaker,
        PartyId::Other,
    ];

    /// The parties that contest elections and hold whips, canonical order.
    pub const COMPETITIVE: [PartyId; 11] = [
        PartyId::Con,
        PartyId::Lab,
        PartyId::Lib,
        PartyId::Snp,
        PartyId::Reform,
        PartyId::Green,
        PartyId::Plaid,
        PartyId::Dup,
        PartyId::Sf,
        PartyId::Sdlp,
        PartyId::Alliance,
    ];

    /// True for the three non-partisan buckets.
    pub fn is_bucket(self) -> bool {
        matches!(self, PartyId::Ind | PartyId::Speaker | PartyId::Other)
    }

    /// Stable lowercase key, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            PartyId::Con => "con",
            PartyId::Lab => "lab",
            PartyId::Lib => "lib",
            PartyId::Snp => "snp",
            PartyId::Reform => "reform",
            PartyId::Green => "green",
            PartyId::Plaid => "plaid",
            PartyId::Dup => "dup",
            PartyId::Sf => "sf",
            PartyId::Sdlp => "sdlp",
            PartyId::Alliance => "alliance",
            PartyId::Ind => "ind",
            PartyId::Speaker => "speaker",
            PartyId::Other => "other",
        }
    }

    /// Parse a lowercase key back into an id (for CLI input and saves).
    pub fn parse(s: &str) -> Option<PartyId> {
        PartyId::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four countries of the United Kingdom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    England,
    Wales,
    Scotland,
    NorthernIreland,
}

impl Country {
    pub fn name(self) -> &'static str {
        match self {
            Country::England => "England",
            Country::Wales => "Wales",
            Country::Scotland => "Scotland",
            Country::NorthernIreland => "Northern Ireland",
        }
    }
}

/// The twelve electoral regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    NorthEast,
    NorthWest,
    YorkshireHumber,
    EastMidlands,
    WestMidlands,
    EastOfEngland,
    London,
    SouthEast,
    SouthWest,
    Wales,
    Scotland,
    NorthernIreland,
}

impl Region {
    pub const ALL: [Region; 12] = [
        Region::NorthEast,
        Region::NorthWest,
        Region::YorkshireHumber,
        Region::EastMidlands,
        Region::WestMidlands,
        Region::EastOfEngland,
        Region::London,
        Region::SouthEast,
        Region::SouthWest,
        Region::Wales,
        Region::Scotland,
        Region::NorthernIreland,
    ];

    /// Country containing this region.
    pub fn country(self) -> Country {
        match self {
            Region::Wales => Country::Wales,
            Region::Scotland => Country::Scotland,
            Region::NorthernIreland => Country::NorthernIreland,
            _ => Country::England,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::NorthEast => "North East",
            Region::NorthWest => "North West",
            Region::YorkshireHumber => "Yorkshire and The Humber",
            Region::EastMidlands => "East Midlands",
            Region::WestMidlands => "West Midlands",
            Region::EastOfEngland => "East of England",
            Region::London => "London",
            Region::SouthEast => "South East",
            Region::SouthWest => "South West",
            Region::Wales => "Wales",
            Region::Scotland => "Scotland",
            Region::NorthernIreland => "Northern Ireland",
        }
    }

    /// Parse a display name (case-insensitive) back into a region.
    pub fn parse(s: &str) -> Option<Region> {
        let lower = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.name().to_lowercase() == lower)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Game phase. Gates which actions are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Parliament is sitting: bills, PMQs, monthly turns.
    Governing,
    /// An election has been called: campaigning, then polling day.
    Campaign,
}

/// Policy axes. Each runs 0 (left/liberal) to 100 (right/authoritarian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAxis {
    Economy,
    Taxation,
    Health,
    Immigration,
    Environment,
    Defence,
    Devolution,
}

impl PolicyAxis {
    pub const ALL: [PolicyAxis; 7] = [
        PolicyAxis::Economy,
        PolicyAxis::Taxation,
        PolicyAxis::Health,
        PolicyAxis::Immigration,
        PolicyAxis::Environment,
        PolicyAxis::Defence,
        PolicyAxis::Devolution,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyAxis::Economy => "Economy",
            PolicyAxis::Taxation => "Taxation",
            PolicyAxis::Health => "NHS & Welfare",
            PolicyAxis::Immigration => "Immigration",
            PolicyAxis::Environment => "Environment",
            PolicyAxis::Defence => "Defence & Foreign",
            PolicyAxis::Devolution => "Devolution",
        }
    }

    pub fn parse(s: &str) -> Option<PolicyAxis> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Some(PolicyAxis::Economy),
            "taxation" | "tax" => Some(PolicyAxis::Taxation),
            "health" | "nhs" => Some(PolicyAxis::Health),
            "immigration" => Some(PolicyAxis::Immigration),
            "environment" => Some(PolicyAxis::Environment),
            "defence" => Some(PolicyAxis::Defence),
            "devolution" => Some(PolicyAxis::Devolution),
            _ => None,
        }
    }
}

/// A position on the policy axes.
///
/// Party platforms are total (all seven axes set); bills may take a
/// position on only the axes they touch. Values are clamped to [0, 100].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ideology(BTreeMap<PolicyAxis, f64>);

impl Ideology {
    /// An ideology with no declared axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a total ideology from values in `PolicyAxis::ALL` order.
    pub fn complete(values: [f64; 7]) -> Self {
        let mut map = BTreeMap::new();
        for (axis, value) in PolicyAxis::ALL.into_iter().zip(values) {
            map.insert(axis, value.clamp(0.0, 100.0));
        }
        Self(map)
    }

    pub fn from_axes(axes: &[(PolicyAxis, f64)]) -> Self {
        let mut out = Self::new();
        for &(axis, value) in axes {
            out.set(axis, value);
        }
        out
    }

    pub fn get(&self, axis: PolicyAxis) -> Option<f64> {
        self.0.get(&axis).copied()
    }

    pub fn set(&mut self, axis: PolicyAxis, value: f64) {
        self.0.insert(axis, value.clamp(0.0, 100.0));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate declared axes in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (PolicyAxis, f64)> + '_ {
        self.0.iter().map(|(&axis, &value)| (axis, value))
    }

    /// Similarity between this platform and a bill's position, in [0, 1].
    ///
    /// Averaged per shared axis: `(100 - |a - b|) / 100`. A bill with no
    /// declared axes scores a neutral 0.5 rather than zero, so content-free
    /// legislation reads as unobjectionable instead of maximally hostile.
    pub fn alignment(&self, bill: &Ideology) -> f64 {
        let mut total = 0.0;
        let mut shared = 0u32;
        for (axis, value) in bill.iter() {
            if let Some(own) = self.get(axis) {
                total += (100.0 - (own - value).abs()) / 100.0;
                shared += 1;
            }
        }
        if shared == 0 {
            0.5
        } else {
            total / f64::from(shared)
        }
    }
}

/// Prime Minister's Questions strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PmqStrategy {
    /// Go on the offensive. High risk, high reward.
    Attack,
    /// Highlight achievements. Safe but can seem evasive.
    Defend,
    /// Redirect to a preferred topic. Moderate risk.
    Pivot,
    /// Deflect with wit. Great if it lands, awful if it doesn't.
    Humour,
}

impl PmqStrategy {
    pub fn parse(s: &str) -> Option<PmqStrategy> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Some(PmqStrategy::Attack),
            "defend" => Some(PmqStrategy::Defend),
            "pivot" => Some(PmqStrategy::Pivot),
            "humour" | "humor" => Some(PmqStrategy::Humour),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PmqStrategy::Attack => "attack",
            PmqStrategy::Defend => "defend",
            PmqStrategy::Pivot => "pivot",
            PmqStrategy::Humour => "humour",
        }
    }
}
