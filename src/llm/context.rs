//! Gather game context for generator prompts
//!
//! Builds a readable summary of the political situation so generated
//! events, debates, and headlines stay anchored to the actual game
//! state. Strictly read-only over the world.

use crate::core::calendar;
use crate::core::types::{PartyId, Phase};
use crate::data::parties;
use crate::state::WorldState;

/// A snapshot of the situation for prompt construction.
pub struct GameContext {
    pub date: String,
    pub player_party: String,
    pub player_name: String,
    pub in_government: bool,
    pub pm_party: String,
    /// Parties with at least one seat, as "short: count"
    pub seat_lines: Vec<String>,
    /// Parties polling at 1% or better, as "short: pct"
    pub polling_lines: Vec<String>,
    pub approval: f64,
    pub unity: f64,
    pub active_bills: Vec<String>,
    pub phase: Phase,
    pub turn: u32,
}

fn short_name(id: PartyId) -> String {
    parties::party(id)
        .map(|p| p.short.to_string())
        .unwrap_or_else(|| id.as_str().to_string())
}

impl GameContext {
    /// Build a context from the current world state.
    pub fn from_state(state: &WorldState) -> Self {
        let seat_lines = PartyId::ALL
            .into_iter()
            .filter_map(|id| {
                let seats = state.seats_of(id);
                (seats > 0).then(|| format!("{}: {}", short_name(id), seats))
            })
            .collect();

        let polling_lines = PartyId::COMPETITIVE
            .into_iter()
            .filter_map(|id| {
                let pct = state.polling_of(id);
                (pct >= 1.0).then(|| format!("{}: {:.1}%", short_name(id), pct))
            })
            .collect();

        Self {
            date: calendar::format_date(state.turn),
            player_party: parties::party(state.player_party)
                .map(|p| p.name.to_string())
                .unwrap_or_default(),
            player_name: state.player_name.clone(),
            in_government: state.is_in_government,
            pm_party: parties::party(state.pm_party)
                .map(|p| p.name.to_string())
                .unwrap_or_default(),
            seat_lines,
            polling_lines,
            approval: state.approval,
            unity: state.unity,
            active_bills: state.bills.iter().map(|b| b.title.clone()).collect(),
            phase: state.phase,
            turn: state.turn,
        }
    }

    /// Render the context as prompt text.
    pub fn summary(&self) -> String {
        let status = if self.in_government {
            "in government as PM"
        } else {
            "in opposition"
        };
        let bills = if self.active_bills.is_empty() {
            "None".to_string()
        } else {
            self.active_bills.join(", ")
        };
        let phase = match self.phase {
            Phase::Governing => "governing",
            Phase::Campaign => "campaign",
        };

        format!(
            "Current UK political situation ({date}):\n\
             - {party} (led by {name}) is {status}.\n\
             - PM party: {pm}\n\
             - Seats: {seats}\n\
             - Polling: {polling}\n\
             - PM approval: {approval:.0}%, Party unity: {unity:.0}%\n\
             - Active bills: {bills}\n\
             - Phase: {phase}, Turn: {turn}",
            date = self.date,
            party = self.player_party,
            name = self.player_name,
            status = status,
            pm = self.pm_party,
            seats = self.seat_lines.join(", "),
            polling = self.polling_lines.join(", "),
            approval = self.approval,
            unity = self.unity,
            bills = bills,
            phase = phase,
            turn = self.turn,
        )
    }
}
