//! Effect deltas
//!
//! Every mechanical consequence of an event, a PMQ session, or generated
//! content is expressed as one fixed-shape delta. All fields are always
//! present; zero means no change. This keeps validation total - a delta
//! of exactly 0 is never confused with "absent".

use crate::core::types::PartyId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bundle of changes to apply to the world state in one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDelta {
    /// Change to PM approval, in points
    pub approval: f64,
    /// Change to party unity, in points
    pub unity: f64,
    /// Change to campaign funds
    pub funds: i64,
    /// Change to activist numbers
    pub activists: i64,
    /// Per-party polling changes, in points
    pub polling: HashMap<PartyId, f64>,
}

impl EffectDelta {
    /// The identity delta: applying it changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Clamp externally supplied magnitudes to `limit` points.
    ///
    /// Applied to every delta that crosses the generator boundary, so
    /// untrusted content cannot blow a scalar through its range in one
    /// step.
    pub fn clamped(mut self, limit: f64) -> Self {
        self.approval = self.approval.clamp(-limit, limit);
        self.unity = self.unity.clamp(-limit, limit);
        for change in self.polling.values_mut() {
            *change = change.clamp(-limit, limit);
        }
        self
    }
}
