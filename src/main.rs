//! Westminster - Entry Point
//!
//! Interactive driver for the simulation: sets up the async runtime for
//! narrative generation, loads or creates a game, and runs a command
//! loop over the engine. All rendering here is plain text; the engine
//! itself never prints.

use westminster::campaign;
use westminster::core::calendar;
use westminster::core::config::{config, set_config, EngineConfig};
use westminster::core::error::Result;
use westminster::core::types::{PartyId, Phase, PmqStrategy, PolicyAxis, Region};
use westminster::data::parties;
use westminster::engine;
use westminster::events::{self, GameEvent};
use westminster::llm::{NarrativeGenerator, OllamaClient};
use westminster::persist::SaveStore;
use westminster::state::WorldState;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Westminster - UK parliamentary strategy simulation
#[derive(Parser, Debug)]
#[command(name = "westminster")]
#[command(about = "Lead a party through polling, PMQs, divisions and elections")]
struct Args {
    /// Party to lead (con, lab, lib, snp, reform, green, plaid)
    #[arg(long)]
    party: Option<String>,

    /// Your name as party leader
    #[arg(long)]
    name: Option<String>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for save slots
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// Load this slot at startup instead of starting fresh
    #[arg(long)]
    load: Option<u8>,

    /// Tuning overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ollama endpoint for narrative generation
    #[arg(long)]
    endpoint: Option<String>,

    /// Ollama model for narrative generation (enables the generator)
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "westminster=info".into()),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let overrides = EngineConfig::from_toml_file(path)?;
        if set_config(overrides).is_err() {
            tracing::warn!("config already initialized; overrides ignored");
        }
    }

    let rt = Runtime::new()?;
    let store = SaveStore::new(&args.save_dir)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Narrative generation is optional; the game is fully playable on
    // static content alone
    let client = match (&args.model, &args.endpoint) {
        (Some(model), Some(endpoint)) => Some(OllamaClient::new(endpoint.clone(), model.clone())),
        (Some(model), None) => Some(OllamaClient::new(
            westminster::llm::client::DEFAULT_ENDPOINT,
            model.clone(),
        )),
        _ => OllamaClient::from_env().ok(),
    };
    if client.is_none() {
        tracing::info!("no generator configured - using static content");
    }
    let mut generator = NarrativeGenerator::new(client);

    let mut state = match args.load {
        Some(slot) => store.load(slot)?,
        None => new_game(&args)?,
    };

    println!();
    println!("=== WESTMINSTER ===");
    println!(
        "{}, leader of {}. {}",
        state.player_name,
        parties::party(state.player_party).map(|p| p.name).unwrap_or("?"),
        if state.is_in_government {
            "You are Prime Minister."
        } else {
            "You sit on the opposition benches."
        }
    );
    print_help(&state);

    loop {
        print!("\n[{}] > ", calendar::format_date(state.turn));
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();

        match command.as_str() {
            "quit" | "q" => break,
            "help" | "h" => print_help(&state),
            "status" | "s" => print_status(&state),
            "polls" => print_polls(&state),
            "seats" => print_seats(&state),
            "advance" | "a" => advance_month(&mut state, &mut generator, &mut rng, &rt),
            "bills" => print_bills(&state),
            "propose" => {
                let topic = rest.join(" ");
                if topic.is_empty() {
                    println!("Usage: propose <topic>");
                } else {
                    propose_bill(&mut state, &mut generator, &rt, &topic);
                }
            }
            "debate" => match parse_bill_index(&state, &rest) {
                Some(index) => {
                    let bill = state.bills[index].clone();
                    let transcript = rt.block_on(generator.debate(&state, &bill));
                    println!("\n{transcript}");
                }
                None => println!("Usage: debate <bill number> (see 'bills')"),
            },
            "vote" => match parse_bill_index(&state, &rest) {
                Some(index) => hold_division(&mut state, &mut generator, &mut rng, &rt, index),
                None => println!("Usage: vote <bill number> (see 'bills')"),
            },
            "pmqs" => match rest.first().and_then(|s| PmqStrategy::parse(s)) {
                Some(strategy) => take_pmqs(&mut state, &mut generator, &mut rng, &rt, strategy),
                None => println!("Usage: pmqs <attack|defend|pivot|humour>"),
            },
            "policy" => shift_policy(&mut state, &rest),
            "call-election" => match engine::call_election(&mut state) {
                Ok(()) => println!("Election called! The campaign begins."),
                Err(e) => println!("{e}"),
            },
            "campaign" => campaign_action(&mut state, &mut rng, &rest),
            "project" => print_projection(&state),
            "election" => run_election(&mut state),
            "save" => match parse_slot(&rest) {
                Some(slot) => match store.save(slot, &state) {
                    Ok(()) => println!("Saved to slot {slot}."),
                    Err(e) => println!("Save failed: {e}"),
                },
                None => println!("Usage: save <1-3>"),
            },
            "load" => match parse_slot(&rest) {
                Some(slot) => match store.load(slot) {
                    Ok(loaded) => {
                        state = loaded;
                        println!("Loaded slot {slot}. Welcome back, {}.", state.player_name);
                    }
                    Err(e) => println!("Load failed: {e}"),
                },
                None => println!("Usage: load <1-3>"),
            },
            "slots" => {
                for info in store.slots() {
                    if info.empty {
                        println!("  Slot {}: empty", info.slot);
                    } else {
                        println!(
                            "  Slot {}: {} ({}) - {}",
                            info.slot, info.player_name, info.party, info.date
                        );
                    }
                }
            }
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGoodbye! {} turns served, {} elections fought.",
        state.turn, state.election_count
    );
    Ok(())
}

fn new_game(args: &Args) -> Result<WorldState> {
    let party = args
        .party
        .as_deref()
        .and_then(PartyId::parse)
        .filter(|p| parties::PLAYABLE.contains(p))
        .unwrap_or(PartyId::Lab);
    let name = args.name.clone().unwrap_or_else(|| "The Right Honourable Player".into());
    Ok(WorldState::new(party, name))
}

fn print_help(state: &WorldState) {
    println!();
    println!("Commands:");
    println!("  advance / a            - Advance one month");
    println!("  status / s             - Dashboard");
    println!("  polls, seats, bills    - Tables");
    println!("  propose <topic>        - Draft and introduce a bill");
    println!("  debate <n>, vote <n>   - Take a bill through the House");
    println!("  pmqs <strategy>        - attack, defend, pivot or humour");
    println!("  policy <axis> <0-100>  - Shift your platform");
    println!("  call-election          - Go to the country early");
    println!("  campaign <action> <region> - target, rally, doorknock, ad");
    println!("  project, election      - Projection / polling day");
    println!("  save|load <1-3>, slots - Save management");
    println!("  quit / q               - Exit");
    if state.phase == Phase::Campaign {
        println!("\n  An election campaign is under way.");
    }
}

fn print_status(state: &WorldState) {
    println!();
    println!(
        "--- {} | Turn {} | {} ---",
        calendar::format_date(state.turn),
        state.turn,
        match state.phase {
            Phase::Governing => "Governing",
            Phase::Campaign => "CAMPAIGN",
        }
    );
    println!(
        "  Approval {:.0}% ({:+.0})  Unity {:.0}%  Funds {}  Activists {}",
        state.approval, state.approval_trend, state.unity, state.party_funds, state.activists
    );
    println!(
        "  PM: {}  |  Months into parliament: {}/{}",
        parties::party(state.pm_party).map(|p| p.name).unwrap_or("?"),
        state.turns_in_parliament,
        config().turns_per_parliament
    );
    if engine::can_call_election(state) {
        println!("  You may call an election.");
    }
    if engine::is_election_due(state) {
        println!("  Parliament has reached its term limit - an election is due.");
    }
}

fn print_polls(state: &WorldState) {
    println!();
    for id in PartyId::COMPETITIVE {
        let pct = state.polling_of(id);
        if pct >= 0.5 {
            let short = parties::party(id).map(|p| p.short).unwrap_or("?");
            println!("  {short:<10} {pct:>5.1}%  {}", bar(pct));
        }
    }
}

fn bar(pct: f64) -> String {
    "#".repeat((pct / 2.0).round() as usize)
}

fn print_seats(state: &WorldState) {
    println!();
    for id in PartyId::ALL {
        let seats = state.seats_of(id);
        if seats > 0 {
            println!("  {:<10} {seats:>3}", id.as_str());
        }
    }
    println!("  {:<10} {:>3}", "total", state.total_seats());
}

fn print_bills(state: &WorldState) {
    println!();
    if state.bills.is_empty() {
        println!("  No bills before the House.");
    }
    for (index, bill) in state.bills.iter().enumerate() {
        println!("  {}. {} (introduced {})", index + 1, bill.title, calendar::format_date(bill.introduced_turn));
    }
    for bill in state.bill_history.iter().rev().take(5) {
        println!(
            "  [{}] {}",
            match bill.status {
                westminster::state::BillStatus::Passed => "PASSED",
                westminster::state::BillStatus::Defeated => "FELL",
                westminster::state::BillStatus::Active => "ACTIVE",
            },
            bill.title
        );
    }
}

fn parse_bill_index(state: &WorldState, rest: &[&str]) -> Option<usize> {
    let index: usize = rest.first()?.parse().ok()?;
    (index >= 1 && index <= state.bills.len()).then(|| index - 1)
}

fn parse_slot(rest: &[&str]) -> Option<u8> {
    rest.first()?.parse().ok()
}

fn advance_month(
    state: &mut WorldState,
    generator: &mut NarrativeGenerator,
    rng: &mut ChaCha8Rng,
    rt: &Runtime,
) {
    if engine::is_election_due(state) {
        match engine::dissolve_parliament(state) {
            Ok(()) => println!("Parliament has been dissolved. Election called!"),
            Err(e) => println!("{e}"),
        }
        return;
    }

    match engine::advance_turn(state, rng) {
        Ok(report) => println!("Advanced to {}.", report.date),
        Err(e) => {
            println!("{e}");
            return;
        }
    }

    if let Some(event) = rt.block_on(generator.turn_event(state, rng)) {
        resolve_event(state, &event);
    }

    let headlines = rt.block_on(generator.headlines(state, rng));
    println!();
    for headline in &headlines {
        println!("  {}: {}", headline.source, headline.text);
    }
    state.news_log.extend(headlines);

    print_status(state);
}

fn resolve_event(state: &mut WorldState, event: &GameEvent) {
    println!();
    println!("*** {} ({}) ***", event.title, event.severity.as_str());
    println!("{}", event.description);
    for (index, choice) in event.choices.iter().enumerate() {
        println!("  {}. {} - {}", index + 1, choice.label, choice.hint);
    }

    loop {
        print!("Your response (1-{}): ", event.choices.len());
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        if let Ok(pick) = line.trim().parse::<usize>() {
            if pick >= 1 && pick <= event.choices.len() {
                match events::apply_choice(state, event, pick - 1) {
                    Ok(choice) => {
                        println!(
                            "{} (approval {:+.0}, unity {:+.0})",
                            choice.label, choice.effects.approval, choice.effects.unity
                        );
                        return;
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
        println!("Pick a number between 1 and {}.", event.choices.len());
    }
}

fn propose_bill(
    state: &mut WorldState,
    generator: &mut NarrativeGenerator,
    rt: &Runtime,
    topic: &str,
) {
    let draft = rt.block_on(generator.draft_bill(state, topic));
    match engine::create_bill(state, draft.title.clone(), draft.summary, Some(draft.ideology)) {
        Ok(_) => println!("Introduced: {}", draft.title),
        Err(e) => println!("{e}"),
    }
}

fn hold_division(
    state: &mut WorldState,
    generator: &mut NarrativeGenerator,
    rng: &mut ChaCha8Rng,
    rt: &Runtime,
    index: usize,
) {
    let bill = state.bills[index].clone();
    let analysis = rt.block_on(generator.vote_analysis(state, &bill, rng));
    println!("\nWhips' assessment: {}", analysis.analysis);

    match engine::advance_bill(state, bill.id, rng) {
        Ok(vote) => {
            println!(
                "\nDivision on {}: Ayes {} / Noes {} / Abstentions {} - {}",
                bill.title,
                vote.ayes,
                vote.noes,
                vote.abstentions,
                if vote.passed { "the Ayes have it" } else { "the Noes have it" }
            );
            for (party, split) in &vote.breakdown {
                if split.abstained {
                    println!("    {party:<10} abstained ({} seats)", split.seats);
                } else {
                    println!("    {party:<10} {:>3} aye / {:>3} no", split.ayes, split.noes);
                }
            }
        }
        Err(e) => println!("{e}"),
    }
}

fn take_pmqs(
    state: &mut WorldState,
    generator: &mut NarrativeGenerator,
    rng: &mut ChaCha8Rng,
    rt: &Runtime,
    strategy: PmqStrategy,
) {
    // Transcript first, so the printed effects match the session shown
    let transcript = rt.block_on(generator.pmq_transcript(state, strategy));
    match engine::hold_pmqs(state, strategy, rng) {
        Ok(delta) => {
            println!("\n{transcript}");
            println!(
                "\nPMQs concluded. Approval {:+.0}%, unity {:+.0}%.",
                delta.approval, delta.unity
            );
        }
        Err(e) => println!("{e}"),
    }
}

fn shift_policy(state: &mut WorldState, rest: &[&str]) {
    let (Some(axis), Some(value)) = (
        rest.first().and_then(|s| PolicyAxis::parse(s)),
        rest.get(1).and_then(|s| s.parse::<f64>().ok()),
    ) else {
        println!("Usage: policy <economy|tax|nhs|immigration|environment|defence|devolution> <0-100>");
        return;
    };
    match campaign::shift_policy(state, axis, value) {
        Ok(()) => println!("{} now at {:.0}.", axis.name(), value.clamp(0.0, 100.0)),
        Err(e) => println!("{e}"),
    }
}

fn campaign_action(state: &mut WorldState, rng: &mut ChaCha8Rng, rest: &[&str]) {
    let Some(action) = rest.first() else {
        println!("Usage: campaign <target|rally|doorknock|ad> <region>");
        return;
    };
    let region_name = rest[1..].join(" ");
    let Some(region) = Region::parse(&region_name) else {
        println!("Unknown region '{region_name}'. Regions:");
        for region in campaign::targetable_regions(state) {
            println!("  {region}");
        }
        return;
    };

    let outcome = match *action {
        "target" => campaign::target_region(state, region, rng),
        "rally" => campaign::hold_rally(state, region, rng),
        "doorknock" => campaign::doorknock(state, region, rng),
        "ad" | "advert" => campaign::run_advert(state, region, rng),
        _ => {
            println!("Unknown campaign action '{action}'.");
            return;
        }
    };
    match outcome {
        Ok(result) => println!("{}", result.summary),
        Err(e) => println!("{e}"),
    }
}

fn print_projection(state: &WorldState) {
    let projection = engine::calculate_election(state);
    println!("\nProjected result if the election were held today:");
    let mut ranked: Vec<(PartyId, u32)> = projection
        .seats
        .iter()
        .map(|(&party, &seats)| (party, seats))
        .filter(|&(_, seats)| seats > 0)
        .collect();
    ranked.sort_by_key(|&(party, seats)| (std::cmp::Reverse(seats), party));
    for (party, seats) in ranked {
        println!("  {:<10} {seats:>3}", party.as_str());
    }
    println!("\nClosest contests:");
    for contest in projection.constituencies.iter().take(5) {
        println!(
            "  {} ({}) - {} over {} by {:.1}%",
            contest.name,
            contest.region,
            contest.winner,
            contest.runner_up,
            contest.margin * 100.0
        );
    }
}

fn run_election(state: &mut WorldState) {
    match engine::run_election(state) {
        Ok(report) => {
            println!("\n=== ELECTION NIGHT ===");
            for (party, seats) in &report.government.ranking {
                if *seats > 0 {
                    println!("  {:<10} {seats:>3}", party.as_str());
                }
            }
            let government = &report.government;
            if government.has_majority {
                println!(
                    "\n{} forms a government with a majority ({} of {} needed).",
                    parties::party(government.pm_party).map(|p| p.name).unwrap_or("?"),
                    government.government_seats,
                    government.effective_majority
                );
            } else {
                println!(
                    "\nHung parliament: {} is the largest party with {} seats ({} needed).",
                    parties::party(government.pm_party).map(|p| p.name).unwrap_or("?"),
                    government.government_seats,
                    government.effective_majority
                );
            }
            if state.is_in_government {
                println!("You are Prime Minister.");
            } else {
                println!("You return to opposition.");
            }
        }
        Err(e) => println!("{e}"),
    }
}
