//! The simulation engine: polling, elections, government formation,
//! divisions, and the turn orchestrator that sequences them

pub mod division;
pub mod election;
pub mod government;
pub mod polling;
pub mod turn;

pub use division::calculate_division;
pub use election::{calculate_election, ConstituencyResult, ElectionResult};
pub use government::{determine_government, GovernmentOutcome};
pub use polling::update_polling;
pub use turn::{
    advance_bill, advance_turn, call_election, can_call_election, create_bill,
    dissolve_parliament, hold_pmqs, is_election_due, run_election, ElectionReport, TurnReport,
};
