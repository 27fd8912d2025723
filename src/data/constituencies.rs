//! The constituency catalog
//!
//! 649 contested seats (the Speaker's chair makes the 650th). The catalog
//! is generated once, deterministically, from regional vote profiles: each
//! seat gets a left/right tilt and per-party jitter around its region's
//! baseline, a marginality score derived from the top-two gap, and a
//! procedurally composed place name. Read-only at runtime.

use crate::core::types::{Country, PartyId, Region};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Seats contested at a general election (the house minus the Speaker).
pub const CONTESTED_SEATS: usize = 649;

/// Fixed seed for catalog generation: polling day of the 2024 election.
const CATALOG_SEED: u64 = 20_240_704;

/// One electoral district. Immutable after load.
#[derive(Debug, Clone)]
pub struct Constituency {
    pub name: String,
    pub region: Region,
    pub country: Country,
    /// Baseline vote share per party (0-1); the residual is minor-party
    /// and independent vote handled by the Other bucket at election time
    pub lean: HashMap<PartyId, f64>,
    /// Swing sensitivity: 0 = safe seat, 1 = knife-edge marginal
    pub marginality: f64,
}

/// Seats per region; totals 649.
const REGION_SEATS: [(Region, usize); 12] = [
    (Region::NorthEast, 27),
    (Region::NorthWest, 72),
    (Region::YorkshireHumber, 54),
    (Region::EastMidlands, 47),
    (Region::WestMidlands, 57),
    (Region::EastOfEngland, 61),
    (Region::London, 75),
    (Region::SouthEast, 91),
    (Region::SouthWest, 58),
    (Region::Wales, 32),
    (Region::Scotland, 57),
    (Region::NorthernIreland, 18),
];

/// Regional baseline vote shares. Country-locked parties only appear in
/// their own country's regions.
fn region_profile(region: Region) -> &'static [(PartyId, f64)] {
    use PartyId::*;
    match region {
        Region::NorthEast => &[
            (Lab, 0.46),
            (Con, 0.17),
            (Reform, 0.19),
            (Lib, 0.06),
            (Green, 0.06),
        ],
        Region::NorthWest => &[
            (Lab, 0.47),
            (Con, 0.19),
            (Reform, 0.15),
            (Lib, 0.08),
            (Green, 0.06),
        ],
        Region::YorkshireHumber => &[
            (Lab, 0.42),
            (Con, 0.22),
            (Reform, 0.17),
            (Lib, 0.08),
            (Green, 0.06),
        ],
        Region::EastMidlands => &[
            (Lab, 0.37),
            (Con, 0.30),
            (Reform, 0.17),
            (Lib, 0.07),
            (Green, 0.05),
        ],
        Region::WestMidlands => &[
            (Lab, 0.39),
            (Con, 0.27),
            (Reform, 0.16),
            (Lib, 0.08),
            (Green, 0.06),
        ],
        Region::EastOfEngland => &[
            (Con, 0.32),
            (Lab, 0.31),
            (Reform, 0.17),
            (Lib, 0.10),
            (Green, 0.06),
        ],
        Region::London => &[
            (Lab, 0.45),
            (Con, 0.21),
            (Lib, 0.11),
            (Reform, 0.09),
            (Green, 0.09),
        ],
        Region::SouthEast => &[
            (Con, 0.33),
            (Lab, 0.28),
            (Lib, 0.17),
            (Reform, 0.12),
            (Green, 0.06),
        ],
        Region::SouthWest => &[
            (Con, 0.30),
            (Lab, 0.26),
            (Lib, 0.22),
            (Reform, 0.12),
            (Green, 0.06),
        ],
        Region::Wales => &[
            (Lab, 0.40),
            (Con, 0.18),
            (Reform, 0.16),
            (Plaid, 0.14),
            (Lib, 0.06),
            (Green, 0.04),
        ],
        Region::Scotland => &[
            (Lab, 0.34),
            (Snp, 0.31),
            (Con, 0.13),
            (Lib, 0.09),
            (Reform, 0.06),
            (Green, 0.03),
        ],
        Region::NorthernIreland => &[
            (Sf, 0.28),
            (Dup, 0.25),
            (Alliance, 0.17),
            (Sdlp, 0.14),
        ],
    }
}

/// Voting bloc, used to correlate per-seat variation: a seat that tilts
/// right lifts every right-bloc party at the expense of the left bloc.
enum Bloc {
    Left,
    Right,
    Centre,
}

fn bloc(party: PartyId) -> Bloc {
    use PartyId::*;
    match party {
        Con | Reform | Dup => Bloc::Right,
        Lab | Green | Snp | Plaid | Sf | Sdlp => Bloc::Left,
        _ => Bloc::Centre,
    }
}

fn generate_catalog() -> Vec<Constituency> {
    let mut rng = ChaCha8Rng::seed_from_u64(CATALOG_SEED);
    let mut used_names = HashSet::new();
    let mut catalog = Vec::with_capacity(CONTESTED_SEATS);

    for (region, count) in REGION_SEATS {
        let profile = region_profile(region);
        for _ in 0..count {
            // One tilt per seat so left and right move against each other
            let tilt: f64 = rng.gen_range(-1.0..1.0);

            let mut lean = HashMap::new();
            for &(party, base) in profile {
                let bloc_factor = match bloc(party) {
                    Bloc::Right => 1.0 + 0.5 * tilt,
                    Bloc::Left => 1.0 - 0.5 * tilt,
                    Bloc::Centre => rng.gen_range(0.75..1.25),
                };
                let local: f64 = rng.gen_range(0.9..1.1);
                let share = (base * bloc_factor * local).max(0.0);
                if share > 0.005 {
                    lean.insert(party, share);
                }
            }

            // Leave headroom for independents and minor parties
            let total: f64 = lean.values().sum();
            if total > 0.97 {
                let scale = 0.97 / total;
                for share in lean.values_mut() {
                    *share *= scale;
                }
            }

            let marginality = marginality_of(&lean, &mut rng);
            let name = unique_name(region.country(), &mut rng, &mut used_names);

            catalog.push(Constituency {
                name,
                region,
                country: region.country(),
                lean,
                marginality,
            });
        }
    }

    catalog
}

/// Marginality from the gap between the top two shares: a dead heat is a
/// full marginal, a 15-point lead or better is safe.
fn marginality_of(lean: &HashMap<PartyId, f64>, rng: &mut impl Rng) -> f64 {
    let mut shares: Vec<f64> = lean.values().copied().collect();
    shares.sort_by(|a, b| b.total_cmp(a));
    let gap = match (shares.first(), shares.get(1)) {
        (Some(first), Some(second)) => first - second,
        _ => 1.0,
    };
    ((1.0 - gap / 0.15) + rng.gen_range(-0.05..0.05)).clamp(0.02, 0.98)
}

struct NameTable {
    prefixes: &'static [&'static str],
    suffixes: &'static [&'static str],
}

const ENGLAND_NAMES: NameTable = NameTable {
    prefixes: &[
        "Ash", "Bark", "Barn", "Bex", "Brad", "Brent", "Brom", "Carl", "Chel", "Cler", "Dart",
        "Don", "Dun", "Eal", "Farn", "Gains", "Grim", "Hali", "Hart", "Hazel", "Kings", "Lang",
        "Mal", "Mel", "Nor", "Oak", "Pen", "Red", "Rush", "Sal", "Stan", "Stoke", "Thorn", "Til",
        "Wal", "Wel", "Whit", "Wig", "Win", "Wyn",
    ],
    suffixes: &[
        "borough", "bridge", "bury", "by", "dale", "den", "field", "ford", "gate", "ham",
        "hampton", "holme", "hurst", "ley", "mere", "minster", "mouth", "sea", "stead", "thorpe",
        "ton", "wich", "wick", "wood", "worth",
    ],
};

const SCOTLAND_NAMES: NameTable = NameTable {
    prefixes: &[
        "Aber", "Ard", "Bal", "Ben", "Blair", "Brae", "Cair", "Dal", "Drum", "Dun", "Glen",
        "Inver", "Kil", "Kin", "Loch", "Strath", "Tarb",
    ],
    suffixes: &[
        "allan", "ardine", "avon", "beg", "cairn", "cross", "dee", "don", "firth", "garry",
        "gowan", "keith", "more", "muir", "ness", "side",
    ],
};

const WALES_NAMES: NameTable = NameTable {
    prefixes: &[
        "Aber", "Bryn", "Caer", "Cwm", "Glan", "Llan", "Maes", "Nant", "Pen", "Pont", "Tre",
        "Ystrad",
    ],
    suffixes: &[
        "afon", "coed", "dulais", "fawr", "gwyn", "mawr", "meirion", "nedd", "tawe", "wern",
        "onnen", "ydd",
    ],
};

const NI_NAMES: NameTable = NameTable {
    prefixes: &[
        "Aghal", "Bally", "Carn", "Carrick", "Clogh", "Cool", "Derry", "Drom", "Dungan",
        "Magher", "Newtown", "Port", "Strab", "Tan",
    ],
    suffixes: &[
        "aghy", "ana", "brack", "duff", "ena", "ey", "gor", "more", "nure", "patrick", "reagh",
        "town",
    ],
};

const QUALIFIERS: [&str; 5] = ["North", "South", "East", "West", "Mid"];

fn compose_name(table: &NameTable, rng: &mut impl Rng) -> String {
    let prefix = table.prefixes[rng.gen_range(0..table.prefixes.len())];
    let suffix = table.suffixes[rng.gen_range(0..table.suffixes.len())];
    if rng.gen_bool(0.2) {
        let qualifier = QUALIFIERS[rng.gen_range(0..QUALIFIERS.len())];
        format!("{qualifier} {prefix}{suffix}")
    } else {
        format!("{prefix}{suffix}")
    }
}

fn unique_name(country: Country, rng: &mut impl Rng, used: &mut HashSet<String>) -> String {
    let table = match country {
        Country::England => &ENGLAND_NAMES,
        Country::Scotland => &SCOTLAND_NAMES,
        Country::Wales => &WALES_NAMES,
        Country::NorthernIreland => &NI_NAMES,
    };

    for attempt in 0..32 {
        // Double-barreled names past the first few collisions
        let candidate = if attempt < 8 {
            compose_name(table, rng)
        } else {
            format!("{} and {}", compose_name(table, rng), compose_name(table, rng))
        };
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }

    // Astronomically unlikely, but keeps generation total
    let fallback = format!("{} {}", compose_name(table, rng), used.len());
    used.insert(fallback.clone());
    fallback
}

static CATALOG: OnceLock<Vec<Constituency>> = OnceLock::new();

/// The full catalog, generated on first use.
pub fn constituency_catalog() -> &'static [Constituency] {
    CATALOG.get_or_init(generate_catalog)
}
