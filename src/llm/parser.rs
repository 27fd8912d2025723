//! Parse and validate generator output
//!
//! Generated text is untrusted: it may wrap JSON in prose or markdown,
//! drop fields, or propose effects far outside sane bounds. Extraction
//! is three-tier (direct parse, fenced block, bracket scan) and every
//! numeric effect is clamped before it can reach the world state.

use crate::core::config::config;
use crate::core::error::{Result, SimError};
use crate::core::types::{Ideology, PolicyAxis};
use crate::events::{EventCategory, EventChoice, GameEvent, Severity};
use crate::state::EffectDelta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pull a JSON document out of a model response.
///
/// Tier 1: the whole response parses. Tier 2: a fenced code block
/// parses. Tier 3: the outermost brace or bracket span parses.
pub fn extract_json(response: &str) -> Result<String> {
    let trimmed = response.trim();
    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return Ok(trimmed.to_string());
    }

    if let Some(block) = fenced_block(trimmed) {
        if serde_json::from_str::<serde_json::Value>(block).is_ok() {
            return Ok(block.to_string());
        }
    }

    // Whichever delimiter opens first wins: an array of objects must not
    // be mistaken for its first element
    let mut spans: Vec<(char, char)> = vec![('{', '}'), ('[', ']')];
    spans.sort_by_key(|&(open, _)| trimmed.find(open).unwrap_or(usize::MAX));
    for (open, close) in spans {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                let span = &trimmed[start..=end];
                if serde_json::from_str::<serde_json::Value>(span).is_ok() {
                    return Ok(span.to_string());
                }
            }
        }
    }

    Err(SimError::Generator("no JSON found in response".into()))
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip an optional language tag on the fence line
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Extract and deserialize a typed payload in one step.
pub fn parse_payload<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json = extract_json(response)?;
    serde_json::from_str(&json)
        .map_err(|e| SimError::Generator(format!("payload did not match schema: {e}")))
}

/// A generated political event, pre-validation.
#[derive(Debug, Deserialize)]
pub struct GeneratedEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    pub choices: Vec<GeneratedChoice>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedChoice {
    pub label: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub effects: EffectDelta,
}

impl GeneratedEvent {
    /// Validate into a playable event: missing fields become neutral
    /// defaults, effects are clamped to the configured limit.
    pub fn into_event(self) -> Result<GameEvent> {
        if self.title.trim().is_empty() {
            return Err(SimError::Generator("generated event has no title".into()));
        }
        if self.choices.len() < 2 {
            return Err(SimError::Generator(
                "generated event needs at least two choices".into(),
            ));
        }

        let limit = config().effect_limit;
        let choices = self
            .choices
            .into_iter()
            .map(|c| EventChoice {
                label: c.label,
                hint: c.hint,
                effects: c.effects.clamped(limit),
            })
            .collect();

        Ok(GameEvent {
            title: self.title,
            description: self.description,
            severity: self.severity.unwrap_or(Severity::Moderate),
            category: self.category.unwrap_or(EventCategory::PartyPolitics),
            choices,
            generated: true,
        })
    }
}

/// A generated newspaper headline.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedHeadline {
    pub source: String,
    pub headline: String,
}

/// How a division is expected to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    LikelyPass,
    LikelyFail,
    TooClose,
}

/// Commentary on an upcoming division.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteAnalysis {
    pub prediction: Prediction,
    #[serde(default)]
    pub analysis: String,
    #[serde(default, rename = "keyFactors")]
    pub key_factors: Vec<String>,
    #[serde(default, rename = "potentialRebels")]
    pub potential_rebels: String,
}

/// A generated bill draft, pre-validation.
#[derive(Debug, Deserialize)]
pub struct BillDraft {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub ideology: Option<BTreeMap<String, f64>>,
}

impl BillDraft {
    /// Resolve the drafted ideology against the known axis set, clamping
    /// values and dropping unrecognized axes.
    pub fn resolved_ideology(&self, fallback: &Ideology) -> Ideology {
        match &self.ideology {
            None => fallback.clone(),
            Some(axes) => {
                let mut out = Ideology::new();
                for (key, &value) in axes {
                    if let Some(axis) = PolicyAxis::parse(key) {
                        out.set(axis, value);
                    }
                }
                if out.is_empty() {
                    fallback.clone()
                } else {
                    out
                }
            }
        }
    }
}
