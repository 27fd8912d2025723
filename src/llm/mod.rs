//! Narrative generator boundary: Ollama client, prompt context, output
//! validation, and the fallback-substituting facade

pub mod client;
pub mod context;
pub mod narrative;
pub mod parser;

pub use client::OllamaClient;
pub use context::GameContext;
pub use narrative::{DraftedBill, NarrativeGenerator};
pub use parser::{Prediction, VoteAnalysis};
