//! Political events
//!
//! Events arrive most turns, each with a handful of responses carrying
//! mechanical consequences. Content comes from the narrative generator
//! when one is configured, otherwise from the static pool in
//! [`pool`]. Either way the effects flow through the same clamped path.

pub mod pool;

use crate::core::config::config;
use crate::core::error::{Result, SimError};
use crate::core::types::PartyId;
use crate::state::{EffectDelta, LoggedEvent, WorldState};
use crate::core::calendar;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How big a story this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Crisis,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Major => "major",
            Severity::Crisis => "crisis",
        }
    }
}

/// Newsdesk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    Economy,
    Health,
    Immigration,
    Crime,
    Environment,
    ForeignAffairs,
    Education,
    Housing,
    Transport,
    PartyPolitics,
    Scandal,
    Royal,
    Media,
    CultureWar,
}

impl EventCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Economy => "economy",
            EventCategory::Health => "health",
            EventCategory::Immigration => "immigration",
            EventCategory::Crime => "crime",
            EventCategory::Environment => "environment",
            EventCategory::ForeignAffairs => "foreign-affairs",
            EventCategory::Education => "education",
            EventCategory::Housing => "housing",
            EventCategory::Transport => "transport",
            EventCategory::PartyPolitics => "party-politics",
            EventCategory::Scandal => "scandal",
            EventCategory::Royal => "royal",
            EventCategory::Media => "media",
            EventCategory::CultureWar => "culture-war",
        }
    }
}

/// One response the player can choose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChoice {
    pub label: String,
    /// Short mechanical hint shown alongside the label
    pub hint: String,
    pub effects: EffectDelta,
}

/// A political event awaiting a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: EventCategory,
    pub choices: Vec<EventChoice>,
    /// True when the narrative generator produced this event
    pub generated: bool,
}

/// Cycles through the fallback pool without repeats until exhausted.
#[derive(Debug, Default)]
pub struct EventDeck {
    used: Vec<usize>,
}

impl EventDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a fallback event, tying approval swings to the player's own
    /// polling so decisions feed back into vote intention.
    pub fn draw(&mut self, player: PartyId, rng: &mut impl Rng) -> GameEvent {
        let events = pool::fallback_events();
        if self.used.len() >= events.len() {
            self.used.clear();
        }

        let mut index = rng.gen_range(0..events.len());
        while self.used.contains(&index) {
            index = rng.gen_range(0..events.len());
        }
        self.used.push(index);

        let mut event = events[index].clone();
        for choice in &mut event.choices {
            if choice.effects.approval != 0.0 {
                choice
                    .effects
                    .polling
                    .insert(player, choice.effects.approval * 0.3);
            }
        }
        event
    }
}

/// Roll whether an event fires this turn, and draw one if so.
pub fn maybe_event(state: &WorldState, deck: &mut EventDeck, rng: &mut impl Rng) -> Option<GameEvent> {
    if rng.gen::<f64>() > config().event_chance {
        return None;
    }
    Some(deck.draw(state.player_party, rng))
}

/// Resolve an event with the player's chosen response.
///
/// Effects are clamped, applied, and the decision is logged.
pub fn apply_choice(
    state: &mut WorldState,
    event: &GameEvent,
    choice_index: usize,
) -> Result<EventChoice> {
    let choice = event.choices.get(choice_index).ok_or_else(|| {
        SimError::InvalidTransition(format!(
            "event '{}' has no choice {}",
            event.title, choice_index
        ))
    })?;

    let effects = choice.effects.clone().clamped(config().effect_limit);
    state.apply_effects(&effects);

    state.event_log.push(LoggedEvent {
        title: event.title.clone(),
        description: event.description.clone(),
        severity: event.severity.as_str().to_string(),
        category: event.category.as_str().to_string(),
        chosen_label: choice.label.clone(),
        effects: effects.clone(),
        turn: state.turn,
        date: calendar::format_date(state.turn),
    });

    Ok(choice.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_deck_avoids_repeats_until_exhausted() {
        let mut deck = EventDeck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let pool_size = pool::fallback_events().len();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..pool_size {
            let event = deck.draw(PartyId::Lab, &mut rng);
            assert!(seen.insert(event.title.clone()), "repeat before exhaustion");
        }
        // The deck recycles afterwards rather than running dry
        let _ = deck.draw(PartyId::Lab, &mut rng);
    }

    #[test]
    fn test_approval_swings_touch_player_polling() {
        let mut deck = EventDeck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let event = deck.draw(PartyId::Green, &mut rng);
        for choice in &event.choices {
            if choice.effects.approval != 0.0 {
                let tied = choice.effects.polling.get(&PartyId::Green).copied();
                assert_eq!(tied, Some(choice.effects.approval * 0.3));
            }
        }
    }

    #[test]
    fn test_apply_choice_logs_and_clamps() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        let event = GameEvent {
            title: "Test Storm".into(),
            description: "A test.".into(),
            severity: Severity::Crisis,
            category: EventCategory::Economy,
            choices: vec![EventChoice {
                label: "Ride it out".into(),
                hint: "".into(),
                effects: EffectDelta {
                    approval: 99.0, // generator gone wild; must be clamped
                    ..EffectDelta::none()
                },
            }],
            generated: true,
        };

        apply_choice(&mut state, &event, 0).unwrap();
        assert_eq!(state.approval, 60.0); // 45 + clamped 15
        assert_eq!(state.event_log.len(), 1);
        assert_eq!(state.event_log[0].chosen_label, "Ride it out");
    }

    #[test]
    fn test_bad_choice_index_rejected() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        let mut deck = EventDeck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let event = deck.draw(PartyId::Lab, &mut rng);
        assert!(apply_choice(&mut state, &event, 99).is_err());
        assert!(state.event_log.is_empty());
    }

    #[test]
    fn test_event_chance_respects_seed() {
        let state = WorldState::new(PartyId::Lab, "Test");
        let mut deck_a = EventDeck::new();
        let mut deck_b = EventDeck::new();
        let mut rng_a = ChaCha8Rng::seed_from_u64(9);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..10 {
            let a = maybe_event(&state, &mut deck_a, &mut rng_a);
            let b = maybe_event(&state, &mut deck_b, &mut rng_b);
            assert_eq!(a.is_some(), b.is_some());
            if let (Some(a), Some(b)) = (a, b) {
                assert_eq!(a.title, b.title);
            }
        }
    }
}
