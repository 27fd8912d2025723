//! Mutable game state: the world snapshot, legislation, effect deltas

pub mod bill;
pub mod effects;
pub mod world;

pub use bill::{Bill, BillStage, BillStatus, DivisionResult, PartyVotes};
pub use effects::EffectDelta;
pub use world::{ElectionRecord, Headline, LoggedEvent, WorldState, SAVE_VERSION};
