//! Static fallback content
//!
//! Used whenever the narrative generator is absent, unreachable, or
//! returns something unusable. The pool is deliberately evergreen UK
//! politics: it has to read sensibly at any point in a playthrough.

use crate::events::{EventCategory, EventChoice, GameEvent, Severity};
use crate::state::EffectDelta;
use std::sync::OnceLock;

fn effects(approval: f64, unity: f64, funds: i64) -> EffectDelta {
    EffectDelta {
        approval,
        unity,
        funds,
        ..EffectDelta::none()
    }
}

fn choice(label: &str, hint: &str, fx: EffectDelta) -> EventChoice {
    EventChoice {
        label: label.into(),
        hint: hint.into(),
        effects: fx,
    }
}

fn event(
    title: &str,
    description: &str,
    severity: Severity,
    category: EventCategory,
    choices: Vec<EventChoice>,
) -> GameEvent {
    GameEvent {
        title: title.into(),
        description: description.into(),
        severity,
        category,
        choices,
        generated: false,
    }
}

fn build_pool() -> Vec<GameEvent> {
    vec![
        event(
            "NHS Winter Crisis",
            "A&E departments across England report record waiting times as winter \
             pressures mount. The BMA calls for emergency funding while opposition \
             parties demand action.",
            Severity::Major,
            EventCategory::Health,
            vec![
                choice(
                    "Announce emergency NHS funding package",
                    "Costly but popular",
                    effects(8.0, -3.0, -100),
                ),
                choice(
                    "Defend current NHS investment levels",
                    "Safe but uninspiring",
                    effects(-3.0, 5.0, 0),
                ),
                choice(
                    "Blame the opposition for legacy underfunding",
                    "Partisan but risky",
                    effects(-2.0, 8.0, 0),
                ),
            ],
        ),
        event(
            "Channel Crossing Surge",
            "Record numbers of small boat crossings in the Channel dominate the news \
             cycle. Pressure mounts from all sides for a clear policy response.",
            Severity::Major,
            EventCategory::Immigration,
            vec![
                choice(
                    "Announce tougher border measures",
                    "Plays well with the right, alienates the left",
                    effects(5.0, -5.0, 0),
                ),
                choice(
                    "Propose an international cooperation deal",
                    "Moderate approach",
                    effects(2.0, 3.0, 0),
                ),
                choice(
                    "Focus on asylum processing reform",
                    "Technocratic solution",
                    effects(-1.0, 2.0, 0),
                ),
            ],
        ),
        event(
            "Interest Rate Decision",
            "The Bank of England is expected to announce its latest interest rate \
             decision. Markets are uncertain and mortgage holders are anxious.",
            Severity::Moderate,
            EventCategory::Economy,
            vec![
                choice(
                    "Publicly support the Bank's independence",
                    "Responsible but passive",
                    effects(1.0, 2.0, 0),
                ),
                choice(
                    "Announce support for mortgage holders",
                    "Popular but costly",
                    effects(6.0, 0.0, -50),
                ),
                choice(
                    "Call for a review of monetary policy",
                    "Bold but controversial",
                    effects(-2.0, -4.0, 0),
                ),
            ],
        ),
        event(
            "Backbench Rebellion Brewing",
            "A group of backbenchers are threatening to vote against the party whip \
             on an upcoming vote, citing concerns about the leadership's direction.",
            Severity::Moderate,
            EventCategory::PartyPolitics,
            vec![
                choice(
                    "Meet the rebels privately to negotiate",
                    "Diplomatic but may look weak",
                    effects(-1.0, 8.0, 0),
                ),
                choice(
                    "Threaten to withdraw the whip",
                    "Strong but divisive",
                    effects(2.0, -10.0, 0),
                ),
                choice(
                    "Make a public speech rallying the party",
                    "Risky but could unite",
                    effects(3.0, 5.0, 0),
                ),
            ],
        ),
        event(
            "Climate Protest Disruption",
            "Climate protesters have blocked major roads in London, causing \
             widespread disruption. Public opinion is divided between sympathy for \
             the cause and frustration at the methods.",
            Severity::Minor,
            EventCategory::Environment,
            vec![
                choice(
                    "Express sympathy for climate concerns",
                    "Green-friendly but alienates drivers",
                    effects(-3.0, -2.0, 0),
                ),
                choice(
                    "Call for tougher protest laws",
                    "Popular with many, dismays liberals",
                    effects(4.0, 0.0, 0),
                ),
                choice(
                    "Announce new green policy commitments",
                    "Pivot to your agenda",
                    effects(2.0, 3.0, 0),
                ),
            ],
        ),
        event(
            "Foreign Affairs Crisis",
            "A developing international crisis requires the UK to take a position. \
             Allies are watching closely, and the press demands a response.",
            Severity::Major,
            EventCategory::ForeignAffairs,
            vec![
                choice(
                    "Take a strong, hawkish stance",
                    "Decisive but escalatory",
                    effects(5.0, 4.0, 0),
                ),
                choice(
                    "Call for diplomatic mediation",
                    "Moderate and measured",
                    effects(2.0, 2.0, 0),
                ),
                choice(
                    "Focus on the domestic impact",
                    "Inward-looking but relatable",
                    effects(1.0, 0.0, 0),
                ),
            ],
        ),
        event(
            "Housing Affordability Report",
            "A damning report reveals housing affordability has reached crisis \
             levels in major cities. Young voters are especially frustrated.",
            Severity::Moderate,
            EventCategory::Housing,
            vec![
                choice(
                    "Announce a major housebuilding programme",
                    "Bold but upsets NIMBYs",
                    effects(6.0, -3.0, 0),
                ),
                choice(
                    "Offer a help-to-buy extension",
                    "Popular but accused of inflating prices",
                    effects(3.0, 2.0, 0),
                ),
                choice(
                    "Promise a planning reform review",
                    "Cautious, low impact",
                    effects(0.0, 1.0, 0),
                ),
            ],
        ),
        event(
            "Ministerial Scandal",
            "A senior minister is accused of breaking the ministerial code. The \
             press demands accountability and the opposition calls for resignation.",
            Severity::Major,
            EventCategory::Scandal,
            vec![
                choice(
                    "Sack the minister immediately",
                    "Decisive but loses an ally",
                    effects(7.0, -8.0, 0),
                ),
                choice(
                    "Launch an independent inquiry",
                    "Measured but looks like delay",
                    effects(-2.0, 3.0, 0),
                ),
                choice(
                    "Publicly back the minister",
                    "Loyal but politically dangerous",
                    effects(-8.0, 6.0, 0),
                ),
            ],
        ),
        event(
            "Cost of Living Squeeze",
            "New inflation figures show the cost of living is still rising faster \
             than wages. Families across the country are struggling.",
            Severity::Major,
            EventCategory::Economy,
            vec![
                choice(
                    "Announce targeted household support",
                    "Popular but expensive",
                    effects(7.0, 1.0, -80),
                ),
                choice(
                    "Point to the long-term economic plan",
                    "On-message but tone-deaf",
                    effects(-4.0, 4.0, 0),
                ),
                choice(
                    "Blame global economic conditions",
                    "Deflects but unconvincing",
                    effects(-2.0, 2.0, 0),
                ),
            ],
        ),
        event(
            "Scottish Independence Push",
            "The Scottish Government announces plans for a new independence \
             referendum. Constitutional tensions escalate.",
            Severity::Major,
            EventCategory::PartyPolitics,
            vec![
                choice(
                    "Firmly reject any referendum",
                    "Unionist-friendly, angers Scotland",
                    effects(2.0, 3.0, 0),
                ),
                choice(
                    "Offer enhanced devolution instead",
                    "Compromise approach",
                    effects(1.0, -2.0, 0),
                ),
                choice(
                    "Agree to talks on the constitution",
                    "Open but politically dangerous",
                    effects(-3.0, -5.0, 0),
                ),
            ],
        ),
        event(
            "Crime Wave Headlines",
            "A series of high-profile violent crimes dominate the tabloids. The \
             public demands tougher action on law and order.",
            Severity::Moderate,
            EventCategory::Crime,
            vec![
                choice(
                    "Announce more police funding",
                    "Direct response",
                    effects(5.0, 2.0, -60),
                ),
                choice(
                    "Propose tougher sentencing laws",
                    "Populist but effective",
                    effects(4.0, 0.0, 0),
                ),
                choice(
                    "Highlight root causes and prevention",
                    "Evidence-based but seen as soft",
                    effects(-2.0, 3.0, 0),
                ),
            ],
        ),
        event(
            "Transport Strike Wave",
            "Rail workers announce a series of strikes over pay and conditions. \
             Commuters face weeks of disruption.",
            Severity::Moderate,
            EventCategory::Transport,
            vec![
                choice(
                    "Support the workers' right to fair pay",
                    "Union-friendly but disruption continues",
                    effects(-3.0, 4.0, 0),
                ),
                choice(
                    "Call for minimum service legislation",
                    "Tough approach, divides opinion",
                    effects(3.0, -3.0, 0),
                ),
                choice(
                    "Offer to mediate between the sides",
                    "Moderate but could satisfy neither",
                    effects(1.0, 1.0, 0),
                ),
            ],
        ),
    ]
}

static POOL: OnceLock<Vec<GameEvent>> = OnceLock::new();

/// The static event pool.
pub fn fallback_events() -> &'static [GameEvent] {
    POOL.get_or_init(build_pool)
}

/// Fallback headline sets: (source, headline) triples.
pub const FALLBACK_HEADLINES: [[(&str, &str); 3]; 5] = [
    [
        ("BBC", "Government faces mounting pressure over policy direction"),
        ("Guardian", "Critics say PM's approach is failing working families"),
        ("Telegraph", "PM must show stronger leadership, say backbenchers"),
    ],
    [
        ("BBC", "Latest polling shows tightening race ahead of next election"),
        ("Sun", "CRUNCH TIME for PM as polls narrow"),
        ("Times", "Westminster insiders predict cabinet reshuffle"),
    ],
    [
        ("BBC", "Economy dominates Parliamentary agenda this week"),
        ("Guardian", "Inequality gap widens under current government, report finds"),
        ("Telegraph", "Business leaders call for tax reform and deregulation"),
    ],
    [
        ("BBC", "Cross-party talks on key legislation expected this week"),
        ("Times", "Backbench rebellion threatens government majority"),
        ("Sun", "PM in HOT WATER as party rebels circle"),
    ],
    [
        ("BBC", "NHS waiting list figures prompt urgent Commons debate"),
        ("Guardian", "Health service at breaking point, warn senior doctors"),
        ("Telegraph", "Throwing money at NHS won't fix structural problems"),
    ],
];
