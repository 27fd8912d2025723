//! Turn and election orchestration
//!
//! The phase machine that drives everything else: monthly turns while
//! governing, dissolution into a campaign, polling day, and the bill
//! lifecycle. Illegal transitions are rejected and leave state untouched.

use crate::core::calendar;
use crate::core::config::config;
use crate::core::error::{Result, SimError};
use crate::core::types::{Ideology, PartyId, Phase, PmqStrategy};
use crate::engine::division;
use crate::engine::election::{self, ElectionResult};
use crate::engine::government::{self, GovernmentOutcome};
use crate::engine::polling;
use crate::state::{Bill, BillStage, BillStatus, DivisionResult, EffectDelta, ElectionRecord, WorldState};
use rand::Rng;
use uuid::Uuid;

/// What happened during one advanced turn.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub turn: u32,
    pub date: String,
}

/// Everything produced by polling day.
#[derive(Debug, Clone)]
pub struct ElectionReport {
    pub result: ElectionResult,
    pub government: GovernmentOutcome,
}

/// True once Parliament has reached its term limit.
pub fn is_election_due(state: &WorldState) -> bool {
    state.turns_in_parliament >= config().turns_per_parliament
}

/// True if the player may voluntarily go to the country.
pub fn can_call_election(state: &WorldState) -> bool {
    state.phase == Phase::Governing
        && state.is_in_government
        && state.turns_in_parliament >= config().min_election_turns
}

/// Advance one governing turn: polling drift, office gravity on approval
/// and unity, resource accrual, counters.
///
/// Rejected while campaigning, and rejected once an election is overdue -
/// the caller must dissolve Parliament instead.
pub fn advance_turn(state: &mut WorldState, rng: &mut impl Rng) -> Result<TurnReport> {
    if state.phase != Phase::Governing {
        return Err(SimError::InvalidTransition(
            "turns do not advance during a campaign; hold the election".into(),
        ));
    }
    if is_election_due(state) {
        return Err(SimError::ElectionOverdue);
    }

    let tuning = config();
    state.turn += 1;
    state.turns_in_parliament += 1;

    polling::update_polling(state, rng);

    // Office gravity: approval sags toward the long-run mean, party
    // discipline heals (or cools) toward its own
    let approval_drift = (tuning.approval_drift_target - state.approval) * tuning.approval_drift_rate;
    state.approval = (state.approval + approval_drift).round().clamp(0.0, 100.0);
    let unity_drift = (tuning.unity_drift_target - state.unity) * tuning.unity_drift_rate;
    state.unity = (state.unity + unity_drift).round().clamp(0.0, 100.0);

    state.party_funds += tuning.funds_per_turn;
    state.activists += tuning.activists_per_turn;

    debug_assert!(state.check_invariants().is_ok());
    tracing::debug!(turn = state.turn, "turn advanced");

    Ok(TurnReport {
        turn: state.turn,
        date: calendar::format_date(state.turn),
    })
}

/// The governing party goes to the country early.
pub fn call_election(state: &mut WorldState) -> Result<()> {
    if state.phase != Phase::Governing {
        return Err(SimError::InvalidTransition(
            "an election campaign is already under way".into(),
        ));
    }
    if !state.is_in_government {
        return Err(SimError::ElectionNotAllowed(
            "only the governing party can call an election".into(),
        ));
    }
    if state.turns_in_parliament < config().min_election_turns {
        return Err(SimError::ElectionNotAllowed(format!(
            "parliament must sit at least {} months first",
            config().min_election_turns
        )));
    }

    state.phase = Phase::Campaign;
    state.campaign_targets.clear();
    tracing::info!(turn = state.turn, "election called, campaign begins");
    Ok(())
}

/// Forced dissolution at the end of the parliamentary term.
pub fn dissolve_parliament(state: &mut WorldState) -> Result<()> {
    if state.phase != Phase::Governing {
        return Err(SimError::InvalidTransition(
            "parliament is already dissolved".into(),
        ));
    }
    if !is_election_due(state) {
        return Err(SimError::ElectionNotAllowed(
            "parliament has not reached its term limit".into(),
        ));
    }

    state.phase = Phase::Campaign;
    state.campaign_targets.clear();
    tracing::info!(turn = state.turn, "parliament dissolved at term limit");
    Ok(())
}

/// Polling day: score the election, form a government, reset the term.
pub fn run_election(state: &mut WorldState) -> Result<ElectionReport> {
    if state.phase != Phase::Campaign {
        return Err(SimError::NoElectionCalled);
    }

    let result = election::calculate_election(state);

    state.seats = result.seats.clone();
    // Today's polling becomes the swing baseline for the next cycle
    state.last_election_polling = state.polling.clone();
    state.election_count += 1;
    state.election_history.push(ElectionRecord {
        turn: state.turn,
        date: calendar::format_date(state.turn),
        seats: result.seats.clone(),
        polling: state.polling.clone(),
    });

    let government = government::determine_government(&result.seats);
    state.pm_party = government.pm_party;
    state.is_in_government = state.player_party == government.pm_party;
    state.opposition_leader = government
        .ranking
        .iter()
        .map(|&(party, _)| party)
        .find(|&party| party != government.pm_party)
        .unwrap_or(PartyId::Con);
    state.coalition_partners.clear();

    // New parliament, clean slate
    state.turns_in_parliament = 0;
    state.phase = Phase::Governing;
    state.bills.clear();
    state.government_budget = 100;
    state.campaign_targets.clear();

    // Winning buoys the party; losing stings
    if state.is_in_government {
        state.adjust_approval(10.0);
        state.adjust_unity(15.0);
    } else {
        state.adjust_approval(-5.0);
        state.adjust_unity(-10.0);
    }

    debug_assert!(state.check_invariants().is_ok());
    tracing::info!(
        pm = %government.pm_party,
        seats = government.government_seats,
        majority = government.has_majority,
        "election complete"
    );

    Ok(ElectionReport { result, government })
}

/// Introduce a bill in the player's name. Returns the new bill's id.
pub fn create_bill(
    state: &mut WorldState,
    title: impl Into<String>,
    summary: impl Into<String>,
    ideology: Option<Ideology>,
) -> Result<Uuid> {
    if state.phase != Phase::Governing {
        return Err(SimError::InvalidTransition(
            "bills cannot be introduced during a campaign".into(),
        ));
    }
    let ideology = ideology.unwrap_or_else(|| state.policy.clone());
    let bill = Bill::new(title, summary, state.player_party, ideology, state.turn);
    let id = bill.id;
    state.bills.push(bill);
    Ok(id)
}

/// Put a bill to its division and resolve it.
///
/// Passed bills receive Royal Assent; either way the bill moves to the
/// history with its vote attached.
pub fn advance_bill(
    state: &mut WorldState,
    bill_id: Uuid,
    rng: &mut impl Rng,
) -> Result<DivisionResult> {
    if state.phase != Phase::Governing {
        return Err(SimError::InvalidTransition(
            "the House does not divide during a campaign".into(),
        ));
    }
    let index = state
        .bills
        .iter()
        .position(|bill| bill.id == bill_id)
        .ok_or_else(|| SimError::BillNotFound(bill_id.to_string()))?;

    let vote = division::calculate_division(&state.bills[index], state, rng);

    let mut bill = state.bills.remove(index);
    bill.last_vote = Some(vote.clone());
    bill.resolved_turn = Some(state.turn);
    if vote.passed {
        bill.stage = BillStage::RoyalAssent;
        bill.status = BillStatus::Passed;
    } else {
        bill.status = BillStatus::Defeated;
    }
    tracing::info!(title = %bill.title, passed = vote.passed, "division complete");
    state.bill_history.push(bill);

    Ok(vote)
}

/// Take PMQs with a chosen strategy and apply the fallout.
pub fn hold_pmqs(
    state: &mut WorldState,
    strategy: PmqStrategy,
    rng: &mut impl Rng,
) -> Result<EffectDelta> {
    if state.phase != Phase::Governing {
        return Err(SimError::InvalidTransition(
            "PMQs only run while parliament sits".into(),
        ));
    }
    if !state.is_in_government {
        return Err(SimError::InvalidTransition(
            "only the Prime Minister answers PMQs".into(),
        ));
    }

    let roll: f64 = rng.gen();
    let mut delta = EffectDelta::none();
    match strategy {
        PmqStrategy::Attack => {
            if roll > 0.5 {
                delta.approval = f64::from(rng.gen_range(2..=6));
                delta.unity = f64::from(rng.gen_range(1..=4));
            } else {
                delta.approval = f64::from(rng.gen_range(-4..=-1));
                delta.unity = f64::from(rng.gen_range(-2..=2));
            }
        }
        PmqStrategy::Defend => {
            delta.approval = f64::from(rng.gen_range(-1..=3));
            delta.unity = f64::from(rng.gen_range(1..=3));
        }
        PmqStrategy::Pivot => {
            delta.approval = f64::from(rng.gen_range(0..=4));
            delta.unity = f64::from(rng.gen_range(0..=2));
        }
        PmqStrategy::Humour => {
            if roll > 0.4 {
                delta.approval = f64::from(rng.gen_range(3..=8));
                delta.unity = f64::from(rng.gen_range(2..=5));
            } else {
                delta.approval = f64::from(rng.gen_range(-6..=-2));
                delta.unity = f64::from(rng.gen_range(-3..=-1));
            }
        }
    }

    state.apply_effects(&delta);
    Ok(delta)
}
