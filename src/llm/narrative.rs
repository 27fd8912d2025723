//! Narrative generator facade
//!
//! Single entry point for all generated content. Every request follows
//! the same shape: try the model (when configured), validate and clamp
//! whatever comes back, and on any failure substitute static fallback
//! content of the same schema. The engine never sees a generator error.

use crate::core::calendar;
use crate::core::types::{Ideology, PmqStrategy};
use crate::data::parties;
use crate::engine::division;
use crate::events::pool::FALLBACK_HEADLINES;
use crate::events::{maybe_event, EventDeck, GameEvent};
use crate::llm::client::OllamaClient;
use crate::llm::context::GameContext;
use crate::llm::parser::{
    self, BillDraft, GeneratedEvent, GeneratedHeadline, Prediction, VoteAnalysis,
};
use crate::state::{Bill, Headline, WorldState};
use rand::Rng;

const EVENT_SYSTEM_PROMPT: &str = "You are a British political event generator for a Parliament \
simulator game. Generate realistic UK political events.\n\
Return ONLY a JSON object (no markdown, no explanation) with this exact structure:\n\
{\"title\":\"Event title\",\"description\":\"2-3 sentence description\",\
\"severity\":\"minor|moderate|major|crisis\",\
\"category\":\"economy|health|immigration|crime|environment|foreign-affairs|education|housing|transport|party-politics|scandal|media\",\
\"choices\":[{\"label\":\"Choice text\",\"hint\":\"Brief mechanical hint\",\
\"effects\":{\"approval\":0,\"unity\":0,\"polling\":{}}}]}";

const HEADLINES_SYSTEM_PROMPT: &str = "You are generating British newspaper headlines for a \
Parliament simulator. Return ONLY a JSON array of 3-4 headline objects.\n\
Format: [{\"source\":\"BBC|Guardian|Telegraph|Sun|Times\",\"headline\":\"The headline text\"}]\n\
Each outlet has a distinct voice: BBC is neutral, Guardian is left-leaning, Telegraph is \
right-leaning, Sun is tabloid/populist, Times is establishment.";

const DEBATE_SYSTEM_PROMPT: &str = "You are writing a vivid Parliamentary debate transcript for \
the UK House of Commons. Write in the style of Hansard but more dramatic. Include multiple \
speakers from different parties, reactions from backbenchers (e.g., \"Hear, hear!\" or \
\"Shame!\"), and the Speaker maintaining order. Use British political language and conventions.";

const VOTE_ANALYSIS_SYSTEM_PROMPT: &str = "You are a Parliamentary vote analyst. Provide a brief \
analysis of how a bill vote is likely to go, considering party positions, whipping, and \
potential rebels. Return ONLY a JSON object:\n\
{\"prediction\":\"likely_pass|likely_fail|too_close\",\"analysis\":\"2-3 sentence analysis\",\
\"keyFactors\":[\"factor1\",\"factor2\"],\"potentialRebels\":\"description of likely rebels\"}";

const BILL_DRAFT_SYSTEM_PROMPT: &str = "You are a Parliamentary bill drafter. Generate a bill \
for the UK Parliament. Return ONLY a JSON object:\n\
{\"title\":\"Short Bill Title Act 20XX\",\"summary\":\"One paragraph describing what the bill \
does\",\"ideology\":{\"economy\":50,\"tax\":50,\"nhs\":50,\"immigration\":50,\"environment\":50,\
\"defence\":50,\"devolution\":50}}";

/// A drafted bill ready to introduce.
#[derive(Debug, Clone)]
pub struct DraftedBill {
    pub title: String,
    pub summary: String,
    pub ideology: Ideology,
}

/// All narrative content flows through here.
pub struct NarrativeGenerator {
    client: Option<OllamaClient>,
    deck: EventDeck,
}

impl NarrativeGenerator {
    pub fn new(client: Option<OllamaClient>) -> Self {
        Self {
            client,
            deck: EventDeck::new(),
        }
    }

    /// True when a model is configured (fallbacks still apply on failure).
    pub fn has_generator(&self) -> bool {
        self.client.is_some()
    }

    /// Roll for this turn's event; generated when possible, otherwise
    /// drawn from the static pool.
    pub async fn turn_event(
        &mut self,
        state: &WorldState,
        rng: &mut impl Rng,
    ) -> Option<GameEvent> {
        let fallback = maybe_event(state, &mut self.deck, rng)?;

        if let Some(client) = &self.client {
            let context = GameContext::from_state(state).summary();
            let user = format!(
                "{context}\n\nGenerate a political event appropriate for this situation. Make \
                 it specific to current UK politics. The three choices should have different \
                 risk/reward profiles. Effects should range from -15 to +15 for approval/unity."
            );
            match client.chat(EVENT_SYSTEM_PROMPT, &user, 0.85, 600).await {
                Ok(raw) => match parser::parse_payload::<GeneratedEvent>(&raw)
                    .and_then(GeneratedEvent::into_event)
                {
                    Ok(event) => return Some(event),
                    Err(e) => tracing::warn!("generated event rejected: {e}"),
                },
                Err(e) => tracing::warn!("event generation failed: {e}"),
            }
        }

        Some(fallback)
    }

    /// This turn's front pages.
    pub async fn headlines(&self, state: &WorldState, rng: &mut impl Rng) -> Vec<Headline> {
        if let Some(client) = &self.client {
            let context = GameContext::from_state(state).summary();
            let last_event = state
                .event_log
                .last()
                .map(|e| format!("\nLatest event: \"{}\" - chosen: \"{}\"", e.title, e.chosen_label))
                .unwrap_or_default();
            let user = format!(
                "{context}{last_event}\n\nGenerate 3-4 newspaper headlines about the current \
                 political situation."
            );
            match client.chat(HEADLINES_SYSTEM_PROMPT, &user, 0.7, 200).await {
                Ok(raw) => match parser::parse_payload::<Vec<GeneratedHeadline>>(&raw) {
                    Ok(generated) if !generated.is_empty() => {
                        return generated
                            .into_iter()
                            .map(|h| Headline {
                                source: h.source,
                                text: h.headline,
                                turn: state.turn,
                            })
                            .collect();
                    }
                    Ok(_) => tracing::warn!("generator returned no headlines"),
                    Err(e) => tracing::warn!("generated headlines rejected: {e}"),
                },
                Err(e) => tracing::warn!("headline generation failed: {e}"),
            }
        }

        let set = FALLBACK_HEADLINES[rng.gen_range(0..FALLBACK_HEADLINES.len())];
        set.iter()
            .map(|&(source, text)| Headline {
                source: source.into(),
                text: text.into(),
                turn: state.turn,
            })
            .collect()
    }

    /// A Commons debate transcript for a bill.
    pub async fn debate(&self, state: &WorldState, bill: &Bill) -> String {
        if let Some(client) = &self.client {
            let context = GameContext::from_state(state).summary();
            let proposer = parties::party(bill.proposer)
                .map(|p| p.name)
                .unwrap_or("the Opposition");
            let user = format!(
                "{context}\n\nWrite a Commons debate on the bill: \"{}\" - {}\nProposed by: \
                 {proposer}\n\nWrite 4-6 speech exchanges with different MPs. Include the bill \
                 proposer's opening, opposition response, backbench interventions, and Speaker \
                 interjections.",
                bill.title, bill.summary
            );
            match client.chat(DEBATE_SYSTEM_PROMPT, &user, 0.8, 1200).await {
                Ok(transcript) => return transcript,
                Err(e) => tracing::warn!("debate generation failed: {e}"),
            }
        }

        fallback_debate(state, bill)
    }

    /// A PMQs exchange for the chosen strategy.
    pub async fn pmq_transcript(&self, state: &WorldState, strategy: PmqStrategy) -> String {
        if let Some(client) = &self.client {
            let context = GameContext::from_state(state).summary();
            let opposition = parties::party(state.opposition_leader);
            let topic = state
                .event_log
                .last()
                .map(|e| e.title.clone())
                .unwrap_or_else(|| "the economy and public services".into());
            let system = format!(
                "You are writing Prime Minister's Questions (PMQs) for the UK House of Commons. \
                 Write a dramatic, combative exchange between the PM and Leader of the \
                 Opposition. Include jeering, cheering, Speaker interventions (\"Order! \
                 Order!\"), and the theatrical atmosphere of PMQs. The PM's strategy is: {}.",
                strategy.name()
            );
            let user = format!(
                "{context}\n\nWrite a PMQ exchange (4-6 rounds) between:\nPM: {} ({})\n\
                 Opposition Leader: {} ({})\nTopic: {topic}\nPM strategy: {}",
                state.player_name,
                parties::party(state.player_party).map(|p| p.name).unwrap_or_default(),
                opposition.map(|p| p.leader).unwrap_or("The Leader of the Opposition"),
                opposition.map(|p| p.name).unwrap_or("Opposition"),
                strategy.name()
            );
            match client.chat(&system, &user, 0.8, 800).await {
                Ok(transcript) => return transcript,
                Err(e) => tracing::warn!("PMQ generation failed: {e}"),
            }
        }

        fallback_pmqs(state, strategy)
    }

    /// Commentary on how a bill's division is likely to go.
    pub async fn vote_analysis(
        &self,
        state: &WorldState,
        bill: &Bill,
        rng: &mut impl Rng,
    ) -> VoteAnalysis {
        if let Some(client) = &self.client {
            let context = GameContext::from_state(state).summary();
            let user = format!(
                "{context}\n\nAnalyse the upcoming vote on: \"{}\" - {}\nProposed by: {}",
                bill.title,
                bill.summary,
                parties::party(bill.proposer).map(|p| p.name).unwrap_or_default()
            );
            match client.chat(VOTE_ANALYSIS_SYSTEM_PROMPT, &user, 0.4, 400).await {
                Ok(raw) => match parser::parse_payload::<VoteAnalysis>(&raw) {
                    Ok(analysis) => return analysis,
                    Err(e) => tracing::warn!("generated analysis rejected: {e}"),
                },
                Err(e) => tracing::warn!("vote analysis failed: {e}"),
            }
        }

        fallback_vote_analysis(state, bill, rng)
    }

    /// Draft a bill on a topic; the fallback is a plain boilerplate act
    /// carrying the player's current platform.
    pub async fn draft_bill(&self, state: &WorldState, topic: &str) -> DraftedBill {
        if let Some(client) = &self.client {
            let context = GameContext::from_state(state).summary();
            let user = format!(
                "{context}\n\nDraft a bill about: {topic}\nPolitical leaning: aligned with the \
                 proposing party's ideology"
            );
            match client.chat(BILL_DRAFT_SYSTEM_PROMPT, &user, 0.6, 600).await {
                Ok(raw) => match parser::parse_payload::<BillDraft>(&raw) {
                    Ok(draft) if !draft.title.trim().is_empty() => {
                        return DraftedBill {
                            ideology: draft.resolved_ideology(&state.policy),
                            title: draft.title,
                            summary: draft.summary,
                        };
                    }
                    Ok(_) => tracing::warn!("generated draft had no title"),
                    Err(e) => tracing::warn!("generated draft rejected: {e}"),
                },
                Err(e) => tracing::warn!("bill drafting failed: {e}"),
            }
        }

        DraftedBill {
            title: format!("{topic} Act {}", calendar::year(state.turn)),
            summary: format!(
                "A bill to address {} through comprehensive legislative reform.",
                topic.to_lowercase()
            ),
            ideology: state.policy.clone(),
        }
    }
}

fn fallback_debate(state: &WorldState, bill: &Bill) -> String {
    let proposer = parties::party(bill.proposer);
    let proposer_name = proposer.map(|p| p.leader).unwrap_or("The Minister");
    let proposer_party = proposer.map(|p| p.name).unwrap_or("the Government");
    let opposition = parties::party(state.opposition_leader);
    let opposition_name = opposition.map(|p| p.leader).unwrap_or("The Opposition Leader");
    let opposition_party = opposition.map(|p| p.name).unwrap_or("the Opposition");

    format!(
        "**Mr Speaker:** Order! Order! The House will come to order. We now come to the {title}. \
         I call upon the Honourable Member to move that the bill be now read.\n\n\
         **{proposer_name} ({proposer_party}):** Mr Speaker, I rise to present this bill to the \
         House. {summary} This legislation represents a vital step forward for our nation, and I \
         commend it to the House.\n\n\
         *[Cries of \"Hear, hear!\" from the {proposer_party} benches]*\n\n\
         **{opposition_name} ({opposition_party}):** Mr Speaker, we on these benches have grave \
         concerns. This proposal has once again shown itself to be out of touch with the needs \
         of ordinary working people across this country.\n\n\
         *[Cries of \"Shame!\", cheers from the {opposition_party} benches]*\n\n\
         **Mr Speaker:** Order! The honourable members will contain themselves.\n\n\
         **Backbench MP:** Mr Speaker, I represent a constituency that will be directly affected \
         by this legislation, and my constituents deserve answers.\n\n\
         **{proposer_name}:** I can assure the honourable member and the House that this bill \
         has been carefully drafted with their constituents in mind.\n\n\
         **Mr Speaker:** I think we have heard sufficient debate. The Question is that the bill \
         be now read. Division! Clear the lobbies!",
        title = bill.title,
        summary = bill.summary,
    )
}

fn fallback_pmqs(state: &WorldState, strategy: PmqStrategy) -> String {
    let pm = &state.player_name;
    let opposition = parties::party(state.opposition_leader);
    let opposition_name = opposition.map(|p| p.leader).unwrap_or("The Leader of the Opposition");
    let opposition_party = opposition.map(|p| p.name).unwrap_or("Opposition");

    let response = match strategy {
        PmqStrategy::Attack => format!(
            "**The Prime Minister ({pm}):** Mr Speaker, the Right Honourable member's question \
             reveals a fundamental misunderstanding of the issue. Perhaps if {opposition_party} \
             spent less time plotting and more time proposing solutions, we might get \
             somewhere.\n\n*[Roar of approval from the Government benches]*"
        ),
        PmqStrategy::Defend => format!(
            "**The Prime Minister ({pm}):** Mr Speaker, I am proud of this Government's record. \
             Since taking office, we have delivered on our promises, and the results speak for \
             themselves.\n\n*[Cries of \"Hear, hear!\" from the Government benches]*"
        ),
        PmqStrategy::Pivot => format!(
            "**The Prime Minister ({pm}):** Mr Speaker, the real question the country is asking \
             is not what the Right Honourable member has raised, but what this Government is \
             doing to improve the lives of working people - and on that, our record is \
             clear.\n\n*[Mixed reactions from both sides]*"
        ),
        PmqStrategy::Humour => format!(
            "**The Prime Minister ({pm}):** Mr Speaker, I thank the Right Honourable member for \
             that question - though I suspect even they have forgotten what point they were \
             trying to make!\n\n*[Laughter across the House]*"
        ),
    };

    format!(
        "**Mr Speaker:** Prime Minister's Questions! Question number one - {opposition_name}.\n\n\
         **{opposition_name} ({opposition_party}):** Mr Speaker, the Prime Minister promised the \
         British people real change, yet we see more of the same. Can the Prime Minister explain \
         why ordinary families are still worse off?\n\n\
         *[Cheers from the Opposition benches]*\n\n\
         {response}\n\n\
         **Mr Speaker:** Order! Order! I remind members that the public are watching these \
         proceedings."
    )
}

fn fallback_vote_analysis(state: &WorldState, bill: &Bill, rng: &mut impl Rng) -> VoteAnalysis {
    let dry_run = division::calculate_division(bill, state, rng);
    let prediction = if dry_run.majority > 20 {
        Prediction::LikelyPass
    } else if dry_run.majority < -20 {
        Prediction::LikelyFail
    } else {
        Prediction::TooClose
    };

    VoteAnalysis {
        prediction,
        analysis: format!(
            "Based on current party positions, the vote is expected to be {} Ayes to {} Noes.{}",
            dry_run.ayes,
            dry_run.noes,
            if prediction == Prediction::TooClose {
                " This will be a tight vote."
            } else {
                ""
            }
        ),
        key_factors: vec!["Party discipline".into(), "Ideological alignment".into()],
        potential_rebels: if dry_run.majority < 30 {
            "Some backbenchers may rebel on this issue.".into()
        } else {
            "Rebellion unlikely given the comfortable margin.".into()
        },
    }
}
