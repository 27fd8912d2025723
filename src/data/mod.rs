//! Static reference data: the party catalog and the constituency map

pub mod constituencies;
pub mod parties;

pub use constituencies::{constituency_catalog, Constituency, CONTESTED_SEATS};
pub use parties::{all_parties, baseline_polling, baseline_seats, party, Party};
