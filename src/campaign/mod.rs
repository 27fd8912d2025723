//! Campaign layer: regional targeting, ground game, platform shifts

pub mod actions;
pub mod regions;

pub use actions::{
    doorknock, hold_rally, run_advert, shift_policy, target_region, ActionOutcome,
};
pub use regions::{marginal_seats, region_summaries, targetable_regions, RegionSummary};
