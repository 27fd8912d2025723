//! WorldState - the mutable political snapshot
//!
//! One value of this struct is one running game. It is owned by whoever
//! drives the engine (the CLI loop, a test) and passed by reference into
//! every engine function; there is no global instance, so independent
//! simulations can coexist.

use crate::core::config::config;
use crate::core::types::{Ideology, PartyId, Phase, Region, HOUSE_SIZE};
use crate::data::parties;
use crate::state::bill::Bill;
use crate::state::effects::EffectDelta;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Save-format version. Bump the major component on breaking changes.
pub const SAVE_VERSION: &str = "1.0.0";

/// One archived general election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub turn: u32,
    pub date: String,
    pub seats: HashMap<PartyId, u32>,
    pub polling: HashMap<PartyId, f64>,
}

/// One resolved political event, as recorded in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub category: String,
    pub chosen_label: String,
    pub effects: EffectDelta,
    pub turn: u32,
    pub date: String,
}

/// One newspaper headline, as recorded in the news feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headline {
    pub source: String,
    pub text: String,
    pub turn: u32,
}

/// The complete mutable game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub version: String,
    pub player_party: PartyId,
    pub player_name: String,
    pub phase: Phase,

    // Counters
    pub turn: u32,
    pub turns_in_parliament: u32,
    pub election_count: u32,

    /// Seats by party; always sums to the house size
    pub seats: HashMap<PartyId, u32>,
    /// National vote intention (percent); the Speaker has no entry
    pub polling: HashMap<PartyId, f64>,
    /// Polling snapshot from the most recent election, the swing baseline
    pub last_election_polling: HashMap<PartyId, f64>,

    // Player-party scalars, clamped to [0, 100] where applicable
    pub approval: f64,
    pub approval_trend: f64,
    pub unity: f64,
    pub party_funds: i64,
    pub activists: i64,

    /// The player's current platform (distinct from the party's founding
    /// ideology in the catalog)
    pub policy: Ideology,

    // Legislation
    pub bills: Vec<Bill>,
    pub bill_history: Vec<Bill>,
    /// Political capital available for whipping operations
    pub government_budget: i64,

    // Parliament composition, written only by government formation
    pub is_in_government: bool,
    pub pm_party: PartyId,
    pub opposition_leader: PartyId,
    pub coalition_partners: Vec<PartyId>,

    // Campaigning
    pub campaign_targets: Vec<Region>,

    // Logs
    pub event_log: Vec<LoggedEvent>,
    pub news_log: Vec<Headline>,
    pub election_history: Vec<ElectionRecord>,
}

impl WorldState {
    /// Start a fresh game in July 2024, just after the election.
    ///
    /// `player_party` must be one of the competitive parties.
    pub fn new(player_party: PartyId, player_name: impl Into<String>) -> Self {
        debug_assert!(!player_party.is_bucket(), "player must lead a real party");

        let policy = parties::party(player_party)
            .map(|p| p.ideology.clone())
            .unwrap_or_default();
        let polling = parties::baseline_polling();

        Self {
            version: SAVE_VERSION.to_string(),
            player_party,
            player_name: player_name.into(),
            phase: Phase::Governing,
            turn: 0,
            turns_in_parliament: 0,
            election_count: 0,
            seats: parties::baseline_seats(),
            last_election_polling: polling.clone(),
            polling,
            approval: 45.0,
            approval_trend: 0.0,
            unity: 70.0,
            party_funds: 500,
            activists: 200,
            policy,
            bills: Vec::new(),
            bill_history: Vec::new(),
            government_budget: 100,
            is_in_government: player_party == PartyId::Lab,
            pm_party: PartyId::Lab,
            opposition_leader: if player_party == PartyId::Lab {
                PartyId::Con
            } else {
                player_party
            },
            coalition_partners: Vec::new(),
            campaign_targets: Vec::new(),
            event_log: Vec::new(),
            news_log: Vec::new(),
            election_history: Vec::new(),
        }
    }

    pub fn seats_of(&self, party: PartyId) -> u32 {
        self.seats.get(&party).copied().unwrap_or(0)
    }

    pub fn polling_of(&self, party: PartyId) -> f64 {
        self.polling.get(&party).copied().unwrap_or(0.0)
    }

    pub fn total_seats(&self) -> u32 {
        self.seats.values().sum()
    }

    /// True if `party` sits on the government benches.
    pub fn in_government(&self, party: PartyId) -> bool {
        party == self.pm_party || self.coalition_partners.contains(&party)
    }

    /// Set approval, clamped, tracking the change for display.
    pub fn adjust_approval(&mut self, delta: f64) {
        let old = self.approval;
        self.approval = (self.approval + delta).clamp(0.0, 100.0);
        self.approval_trend = self.approval - old;
    }

    /// Set unity, clamped.
    pub fn adjust_unity(&mut self, delta: f64) {
        self.unity = (self.unity + delta).clamp(0.0, 100.0);
    }

    /// Apply one effect delta through the single clamping path.
    ///
    /// Polling changes are floored and the distribution renormalized, so
    /// no delta can break the polling invariants.
    pub fn apply_effects(&mut self, delta: &EffectDelta) {
        self.adjust_approval(delta.approval);
        self.adjust_unity(delta.unity);
        self.party_funds = (self.party_funds + delta.funds).max(0);
        self.activists = (self.activists + delta.activists).max(0);

        if !delta.polling.is_empty() {
            let floor = config().poll_floor;
            for id in PartyId::ALL {
                if let Some(change) = delta.polling.get(&id) {
                    if let Some(value) = self.polling.get_mut(&id) {
                        *value = (*value + change).max(floor);
                    }
                }
            }
            self.normalize_polling();
        }
    }

    /// Rescale polling back to a 100-point total when it has drifted.
    ///
    /// Values are rounded to one decimal and floored so every party keeps
    /// residual support. The Speaker has no polling entry and is untouched.
    pub fn normalize_polling(&mut self) {
        let tuning = config();
        let total: f64 = self.polling.values().sum();
        if total > 0.0 && (total - 100.0).abs() > tuning.poll_tolerance {
            let factor = 100.0 / total;
            for value in self.polling.values_mut() {
                *value = ((*value * factor * 10.0).round() / 10.0).max(tuning.poll_floor);
            }
        }
    }

    /// Check internal data-integrity invariants.
    ///
    /// Violations are programming errors, not user-facing conditions;
    /// this is for tests and debug assertions.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let total = self.total_seats();
        if total != HOUSE_SIZE {
            return Err(format!("seats sum to {total}, expected {HOUSE_SIZE}"));
        }
        if self.seats_of(PartyId::Speaker) != 1 {
            return Err("the Speaker must hold exactly one seat".into());
        }
        for (&party, &value) in &self.polling {
            if value < 0.0 {
                return Err(format!("{party} polls negative: {value}"));
            }
        }
        if !(0.0..=100.0).contains(&self.approval) {
            return Err(format!("approval out of range: {}", self.approval));
        }
        if !(0.0..=100.0).contains(&self.unity) {
            return Err(format!("unity out of range: {}", self.unity));
        }
        if self.party_funds < 0 || self.activists < 0 {
            return Err("resources must be non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_satisfies_invariants() {
        let state = WorldState::new(PartyId::Lab, "Test Player");
        assert!(state.check_invariants().is_ok());
        assert_eq!(state.total_seats(), HOUSE_SIZE);
        assert!(state.is_in_government);
        assert_eq!(state.opposition_leader, PartyId::Con);
    }

    #[test]
    fn test_opposition_start() {
        let state = WorldState::new(PartyId::Con, "Test Player");
        assert!(!state.is_in_government);
        assert_eq!(state.pm_party, PartyId::Lab);
        assert_eq!(state.opposition_leader, PartyId::Con);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        state.adjust_approval(200.0);
        assert_eq!(state.approval, 100.0);
        state.adjust_approval(-500.0);
        assert_eq!(state.approval, 0.0);
        state.adjust_unity(-500.0);
        assert_eq!(state.unity, 0.0);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_apply_effects_total_path() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        let before_funds = state.party_funds;
        let delta = EffectDelta {
            approval: 8.0,
            unity: -3.0,
            funds: -100,
            activists: 25,
            polling: HashMap::from([(PartyId::Lab, 2.0), (PartyId::Con, -2.0)]),
        };
        state.apply_effects(&delta);
        assert_eq!(state.approval, 53.0);
        assert_eq!(state.approval_trend, 8.0);
        assert_eq!(state.unity, 67.0);
        assert_eq!(state.party_funds, before_funds - 100);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_effects_cannot_drain_resources_negative() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        state.apply_effects(&EffectDelta {
            funds: -100_000,
            activists: -100_000,
            ..EffectDelta::none()
        });
        assert_eq!(state.party_funds, 0);
        assert_eq!(state.activists, 0);
    }

    #[test]
    fn test_normalize_restores_total() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        // Push everything up 50% and let normalization pull it back
        for value in state.polling.values_mut() {
            *value *= 1.5;
        }
        state.normalize_polling();
        let total: f64 = state.polling.values().sum();
        assert!((total - 100.0).abs() < 1.0, "total was {total}");
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        let before = state.clone();
        state.apply_effects(&EffectDelta::none());
        assert_eq!(state.approval, before.approval);
        assert_eq!(state.unity, before.unity);
        assert_eq!(state.party_funds, before.party_funds);
        assert_eq!(state.polling, before.polling);
    }
}
