//! Legislation: bills and division results

use crate::core::types::{Ideology, PartyId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Where a bill sits in its (simplified) parliamentary journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStage {
    /// Tabled and awaiting its Commons division
    Introduced,
    /// Passed its division and received Royal Assent
    RoyalAssent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Active,
    Passed,
    Defeated,
}

/// A piece of legislation before the House.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub proposer: PartyId,
    /// The bill's position on the axes it touches; may be partial
    pub ideology: Ideology,
    pub stage: BillStage,
    pub status: BillStatus,
    /// Result of the most recent division on this bill
    pub last_vote: Option<DivisionResult>,
    pub introduced_turn: u32,
    /// Turn the bill passed or fell, once terminal
    pub resolved_turn: Option<u32>,
}

impl Bill {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        proposer: PartyId,
        ideology: Ideology,
        turn: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            summary: summary.into(),
            proposer,
            ideology,
            stage: BillStage::Introduced,
            status: BillStatus::Active,
            last_vote: None,
            introduced_turn: turn,
            resolved_turn: None,
        }
    }
}

/// How one party's benches split in a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyVotes {
    pub seats: u32,
    pub ayes: u32,
    pub noes: u32,
    /// True for abstentionist benches: all seats sat out
    pub abstained: bool,
}

/// Outcome of a Commons division.
///
/// The breakdown is keyed in canonical party order and only contains
/// parties that actually hold seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionResult {
    pub ayes: u32,
    pub noes: u32,
    pub abstentions: u32,
    pub passed: bool,
    /// Ayes minus noes; negative when the bill falls
    pub majority: i64,
    pub breakdown: BTreeMap<PartyId, PartyVotes>,
}
