//! Chat-completion collaborator
//!
//! Sends a profile-aware system prompt plus the user's question to an
//! OpenAI-compatible endpoint and decodes the reply into a `ChatOutcome`.
//! No retries are attempted.

mod client;
mod wire;

pub use client::{ChatConfig, CompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use wire::{decode_response, system_prompt, ChatOutcome, ChatRequest, Message, Role};

use crate::error::ChatError;
use crate::profile::InvestorProfile;

/// Anything that can answer a question for a given profile
pub trait ChatService {
    fn complete(&self, profile: InvestorProfile, question: &str) -> Result<ChatOutcome, ChatError>;
}
