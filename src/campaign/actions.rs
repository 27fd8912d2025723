//! Campaign actions
//!
//! Everything a party machine can spend its money and people on during
//! an election campaign. Each action deducts resources up front, rolls
//! its outcome, and routes every state change through the clamped
//! effect path, so no action can break the polling invariants.

use crate::core::config::config;
use crate::core::error::{Result, SimError};
use crate::core::types::{PartyId, Phase, PolicyAxis, Region, HOUSE_SIZE};
use crate::data::constituencies::constituency_catalog;
use crate::data::parties;
use crate::campaign::regions::targetable_regions;
use crate::state::WorldState;
use rand::Rng;

/// What a campaign action produced, for display.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub success: bool,
    pub summary: String,
}

fn require_campaign(state: &WorldState) -> Result<()> {
    if state.phase != Phase::Campaign {
        return Err(SimError::InvalidTransition(
            "campaign actions are only available once an election is called".into(),
        ));
    }
    Ok(())
}

fn require_targetable(state: &WorldState, region: Region) -> Result<()> {
    if !targetable_regions(state).contains(&region) {
        return Err(SimError::InvalidTransition(format!(
            "{} cannot campaign in {}",
            state.player_party, region
        )));
    }
    Ok(())
}

/// Deduct a cost, or reject without touching anything.
fn spend(state: &mut WorldState, funds: i64, activists: i64) -> Result<()> {
    if state.party_funds < funds {
        return Err(SimError::InsufficientResources(format!(
            "need {funds} funds, have {}",
            state.party_funds
        )));
    }
    if state.activists < activists {
        return Err(SimError::InsufficientResources(format!(
            "need {activists} activists, have {}",
            state.activists
        )));
    }
    state.party_funds -= funds;
    state.activists -= activists;
    Ok(())
}

/// National polling movement from activity in one region, scaled by how
/// much of the country that region is. A competitor is shaved by half
/// the boost, then the distribution is renormalized.
fn apply_regional_boost(state: &mut WorldState, region: Region, amount: f64, rng: &mut impl Rng) {
    let region_seats = constituency_catalog()
        .iter()
        .filter(|c| c.region == region)
        .count();
    if region_seats == 0 {
        return;
    }

    let boost = region_seats as f64 / f64::from(HOUSE_SIZE) * amount;
    let player = state.player_party;
    if let Some(value) = state.polling.get_mut(&player) {
        *value = (*value + boost).max(0.5);
    }

    // Somebody has to lose the support being won; canonical order keeps
    // the pick reproducible for a given seed
    let competitors: Vec<PartyId> = PartyId::COMPETITIVE
        .into_iter()
        .filter(|&id| id != player && state.polling_of(id) > 2.0)
        .collect();
    if !competitors.is_empty() {
        let victim = competitors[rng.gen_range(0..competitors.len())];
        if let Some(value) = state.polling.get_mut(&victim) {
            *value = (*value - boost * 0.5).max(config().poll_floor);
        }
    }

    state.normalize_polling();
}

/// Commit the ground game to a region for the rest of the campaign.
pub fn target_region(state: &mut WorldState, region: Region, rng: &mut impl Rng) -> Result<ActionOutcome> {
    require_campaign(state)?;
    require_targetable(state, region)?;
    if state.campaign_targets.contains(&region) {
        return Err(SimError::InvalidTransition(format!(
            "{region} is already targeted"
        )));
    }

    let tuning = config();
    spend(state, tuning.target_cost_funds, tuning.target_cost_activists)?;
    state.campaign_targets.push(region);
    apply_regional_boost(state, region, 1.5, rng);

    Ok(ActionOutcome {
        success: true,
        summary: format!("Now targeting {region}"),
    })
}

/// Stage a rally. Usually energizing; occasionally an empty hall.
pub fn hold_rally(state: &mut WorldState, region: Region, rng: &mut impl Rng) -> Result<ActionOutcome> {
    require_campaign(state)?;
    require_targetable(state, region)?;
    let tuning = config();
    spend(state, tuning.rally_cost_funds, tuning.rally_cost_activists)?;

    if rng.gen::<f64>() > 0.3 {
        apply_regional_boost(state, region, 1.0, rng);
        state.adjust_approval(f64::from(rng.gen_range(1..=3)));
        state.adjust_unity(f64::from(rng.gen_range(1..=4)));
        Ok(ActionOutcome {
            success: true,
            summary: format!("Rally in {region} was a success"),
        })
    } else {
        state.adjust_approval(-f64::from(rng.gen_range(1..=2)));
        Ok(ActionOutcome {
            success: false,
            summary: format!("Rally in {region} had poor turnout"),
        })
    }
}

/// Send the activists door to door. Modest but reliable.
pub fn doorknock(state: &mut WorldState, region: Region, rng: &mut impl Rng) -> Result<ActionOutcome> {
    require_campaign(state)?;
    require_targetable(state, region)?;
    let tuning = config();
    spend(state, tuning.doorknock_cost_funds, tuning.doorknock_cost_activists)?;

    apply_regional_boost(state, region, 0.7, rng);
    Ok(ActionOutcome {
        success: true,
        summary: format!("Canvassers in {region} report good reception"),
    })
}

/// Buy advertising. Expensive, effective, occasionally mocked.
pub fn run_advert(state: &mut WorldState, region: Region, rng: &mut impl Rng) -> Result<ActionOutcome> {
    require_campaign(state)?;
    require_targetable(state, region)?;
    let tuning = config();
    spend(state, tuning.advert_cost_funds, tuning.advert_cost_activists)?;

    if rng.gen::<f64>() > 0.25 {
        apply_regional_boost(state, region, 2.0, rng);
        state.adjust_approval(f64::from(rng.gen_range(1..=4)));
        Ok(ActionOutcome {
            success: true,
            summary: format!("Advertising in {region} is making an impact"),
        })
    } else {
        state.adjust_approval(-f64::from(rng.gen_range(1..=3)));
        Ok(ActionOutcome {
            success: false,
            summary: "The advert backfired; opponents are mocking it".into(),
        })
    }
}

/// Move the party platform on one axis.
///
/// Straying more than 30 points from the party's founding position
/// costs unity: the membership notices.
pub fn shift_policy(state: &mut WorldState, axis: PolicyAxis, value: f64) -> Result<()> {
    state.policy.set(axis, value);

    if let Some(founding) = parties::party(state.player_party)
        .and_then(|p| p.ideology.get(axis))
    {
        if (value.clamp(0.0, 100.0) - founding).abs() > 30.0 {
            state.adjust_unity(-2.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn campaign_state() -> WorldState {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        state.turns_in_parliament = 20;
        crate::engine::turn::call_election(&mut state).unwrap();
        state
    }

    #[test]
    fn test_actions_gated_to_campaign_phase() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            hold_rally(&mut state, Region::London, &mut rng),
            Err(SimError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_target_region_spends_and_boosts() {
        let mut state = campaign_state();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let funds = state.party_funds;
        let before = state.polling_of(PartyId::Lab);

        target_region(&mut state, Region::NorthWest, &mut rng).unwrap();

        assert_eq!(state.party_funds, funds - 50);
        assert!(state.campaign_targets.contains(&Region::NorthWest));
        // Boost lands before renormalization trims it back; polling must
        // still be coherent
        assert!(state.check_invariants().is_ok());
        let after = state.polling_of(PartyId::Lab);
        assert!(after >= before - 1.0);
    }

    #[test]
    fn test_cannot_target_twice() {
        let mut state = campaign_state();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        target_region(&mut state, Region::London, &mut rng).unwrap();
        assert!(target_region(&mut state, Region::London, &mut rng).is_err());
    }

    #[test]
    fn test_broke_campaign_is_rejected_cleanly() {
        let mut state = campaign_state();
        state.party_funds = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let before = state.clone();
        assert!(matches!(
            run_advert(&mut state, Region::London, &mut rng),
            Err(SimError::InsufficientResources(_))
        ));
        // Rejection must not partially spend
        assert_eq!(state.activists, before.activists);
        assert_eq!(state.party_funds, 0);
    }

    #[test]
    fn test_country_lock_applies_to_campaigning() {
        let mut state = WorldState::new(PartyId::Snp, "Test");
        state.phase = Phase::Campaign;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(doorknock(&mut state, Region::London, &mut rng).is_err());
        assert!(doorknock(&mut state, Region::Scotland, &mut rng).is_ok());
    }

    #[test]
    fn test_policy_shift_clamps_and_costs_unity() {
        let mut state = WorldState::new(PartyId::Lab, "Test");
        let unity = state.unity;

        // Small move: free
        shift_policy(&mut state, PolicyAxis::Economy, 40.0).unwrap();
        assert_eq!(state.unity, unity);

        // Lurch: the membership notices
        shift_policy(&mut state, PolicyAxis::Economy, 90.0).unwrap();
        assert_eq!(state.unity, unity - 2.0);
        assert_eq!(state.policy.get(PolicyAxis::Economy), Some(90.0));

        // Out-of-range values are clamped
        shift_policy(&mut state, PolicyAxis::Taxation, 400.0).unwrap();
        assert_eq!(state.policy.get(PolicyAxis::Taxation), Some(100.0));
    }
}
