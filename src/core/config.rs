//! Simulation tuning with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values can be overridden from a
//! TOML file; anything not present in the file keeps its default.

use crate::core::error::{Result, SimError};
use serde::Deserialize;
use std::path::Path;

/// Tuning constants for the simulation engine
///
/// These values have been tuned for gameplay pacing, not statistical
/// accuracy. Changing them changes how volatile polling feels and how
/// often governments fall.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    // === POLLING MODEL ===
    /// Half-width of the uniform noise applied to each party per turn (points)
    ///
    /// At 1.5, a party can drift up to +/-1.5 points a month before
    /// feedback and reversion are applied.
    pub poll_noise: f64,

    /// Fraction of the gap to baseline recovered each turn
    ///
    /// At 0.05, a 10-point departure from baseline halves in roughly
    /// 14 turns. Keeps long runs from walking off to extremes.
    pub poll_reversion: f64,

    /// Minimum polling value after any mutation (points)
    ///
    /// A party always retains residual support; nothing ever polls at
    /// exactly zero.
    pub poll_floor: f64,

    /// Renormalization trigger: rescale when the total departs from 100
    /// by more than this (points)
    pub poll_tolerance: f64,

    /// Polling gained per point of PM approval above 50 (player party only)
    pub approval_polling_gain: f64,

    /// Unity level below which the player party starts leaking support
    pub unity_low_threshold: f64,

    /// Polling lost per point of unity shortfall below the threshold
    pub unity_polling_penalty: f64,

    // === TURN DRIFT ===
    /// Long-run approval level that office gravity pulls toward
    pub approval_drift_target: f64,

    /// Fraction of the approval gap closed per turn
    pub approval_drift_rate: f64,

    /// Long-run unity level factions drift back toward
    pub unity_drift_target: f64,

    /// Fraction of the unity gap closed per turn
    pub unity_drift_rate: f64,

    /// Campaign funds accrued per turn
    pub funds_per_turn: i64,

    /// Activists recruited per turn
    pub activists_per_turn: i64,

    // === PARLIAMENT TERM ===
    /// Turns before Parliament must be dissolved (60 months = 5 years)
    pub turns_per_parliament: u32,

    /// Earliest turn at which the governing party may call an election
    pub min_election_turns: u32,

    // === ELECTION CALCULATOR ===
    /// Swing multiplier in a party's home regions
    pub home_region_swing: f64,

    /// Extra swing per point of marginality (a fully marginal seat
    /// swings `1 + marginality_swing` times the regional figure)
    pub marginality_swing: f64,

    /// Constituency vote-share total below which the residual is
    /// handed to the Other bucket
    pub residual_threshold: f64,

    // === DIVISIONS ===
    /// Baseline rebellion rate for the proposing party's benches
    pub proposer_rebel_rate: f64,

    /// Baseline rebellion rate for other whipped government benches
    pub government_rebel_rate: f64,

    /// Assumed unity factor for whipped parties other than the player's
    pub assumed_unity: f64,

    /// Alignment above which opposition benches lend real support
    pub high_alignment: f64,

    /// Alignment above which opposition support is lukewarm rather
    /// than hostile
    pub medium_alignment: f64,

    /// Aye fraction per point of alignment in the high band
    pub high_support_gain: f64,

    /// Aye fraction per point of alignment in the medium band
    pub medium_support_gain: f64,

    /// Aye fraction for hostile benches (there is always a handful of
    /// mavericks)
    pub opposition_support_floor: f64,

    /// Half-width of the per-party integer noise on a division (seats)
    pub division_noise: i64,

    // === EVENTS & GENERATOR ===
    /// Chance of a political event firing on any given turn
    pub event_chance: f64,

    /// Largest approval/unity delta accepted from generated content;
    /// anything beyond is clamped before it touches the world state
    pub effect_limit: f64,

    // === CAMPAIGN ===
    /// Funds cost of targeting a region
    pub target_cost_funds: i64,
    /// Activists cost of targeting a region
    pub target_cost_activists: i64,

    /// Funds cost of holding a rally
    pub rally_cost_funds: i64,
    /// Activists cost of holding a rally
    pub rally_cost_activists: i64,

    /// Funds cost of a doorknocking drive
    pub doorknock_cost_funds: i64,
    /// Activists cost of a doorknocking drive
    pub doorknock_cost_activists: i64,

    /// Funds cost of an advertising push
    pub advert_cost_funds: i64,
    /// Activists cost of an advertising push
    pub advert_cost_activists: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Polling (noise > feedback > reversion, in magnitude)
            poll_noise: 1.5,
            poll_reversion: 0.05,
            poll_floor: 0.1,
            poll_tolerance: 0.5,
            approval_polling_gain: 0.03,
            unity_low_threshold: 50.0,
            unity_polling_penalty: 0.02,

            // Turn drift
            approval_drift_target: 40.0,
            approval_drift_rate: 0.02,
            unity_drift_target: 60.0,
            unity_drift_rate: 0.03,
            funds_per_turn: 100,
            activists_per_turn: 50,

            // Term limits
            turns_per_parliament: 60,
            min_election_turns: 12,

            // Election calculator
            home_region_swing: 1.3,
            marginality_swing: 0.3,
            residual_threshold: 0.95,

            // Divisions
            proposer_rebel_rate: 0.15,
            government_rebel_rate: 0.2,
            assumed_unity: 0.75,
            high_alignment: 0.65,
            medium_alignment: 0.4,
            high_support_gain: 0.6,
            medium_support_gain: 0.3,
            opposition_support_floor: 0.05,
            division_noise: 5,

            // Events
            event_chance: 0.7,
            effect_limit: 15.0,

            // Campaign costs
            target_cost_funds: 50,
            target_cost_activists: 25,
            rally_cost_funds: 30,
            rally_cost_activists: 15,
            doorknock_cost_funds: 10,
            doorknock_cost_activists: 30,
            advert_cost_funds: 80,
            advert_cost_activists: 5,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a TOML file on top of the defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| SimError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(SimError::Config)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.poll_floor <= 0.0 {
            return Err("poll_floor must be positive".into());
        }
        if !(0.0..1.0).contains(&self.poll_reversion) {
            return Err("poll_reversion must be in [0, 1)".into());
        }
        if self.medium_alignment >= self.high_alignment {
            return Err(format!(
                "medium_alignment ({}) should be < high_alignment ({})",
                self.medium_alignment, self.high_alignment
            ));
        }
        if self.min_election_turns >= self.turns_per_parliament {
            return Err(format!(
                "min_election_turns ({}) should be < turns_per_parliament ({})",
                self.min_election_turns, self.turns_per_parliament
            ));
        }
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err("event_chance must be in [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.assumed_unity) {
            return Err("assumed_unity must be in [0, 1]".into());
        }
        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}
