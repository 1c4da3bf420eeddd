//! Ask flow: question in, answer out, exchange logged

use log::{info, warn};

use crate::chat::{ChatOutcome, ChatService};
use crate::error::AssistantError;
use crate::history::{ConversationLog, ConversationRecord};
use crate::profile::InvestorProfile;

/// Couples a chat service with the conversation log
///
/// One request at a time; the exchange is written only after a successful
/// answer has arrived.
pub struct Assistant<S> {
    service: S,
    log: ConversationLog,
}

impl<S: ChatService> Assistant<S> {
    pub fn new(service: S, log: ConversationLog) -> Self {
        Self { service, log }
    }

    /// Ask a question on behalf of a user with the given profile
    pub fn ask(&self, profile: InvestorProfile, question: &str) -> Result<ChatOutcome, AssistantError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }

        let outcome = self.service.complete(profile, question)?;
        match &outcome {
            ChatOutcome::Success { answer } => {
                self.log.append(&ConversationRecord::new(question, answer.as_str()))?;
                info!("answered question for {} profile", profile);
            }
            ChatOutcome::Failure { error_detail } => {
                warn!("question not answered: {}", error_detail);
            }
        }

        Ok(outcome)
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}
