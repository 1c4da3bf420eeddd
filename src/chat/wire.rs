//! Wire format of the OpenAI-compatible chat-completion API

use serde::{Deserialize, Serialize};

use crate::profile::InvestorProfile;

/// Longest slice of an unreadable body quoted back in a failure
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// System prompt carrying the profile, followed by the user's question
    pub fn for_question(model: &str, profile: InvestorProfile, question: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message::system(system_prompt(profile)), Message::user(question)],
        }
    }
}

/// Instructions sent ahead of every question
pub fn system_prompt(profile: InvestorProfile) -> String {
    format!(
        "You are an educational financial assistant. \
         The user has a {profile} investor profile. \
         Never give a direct investment recommendation. \
         Explain clearly and didactically."
    )
}

/// Decoded reply from the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatOutcome {
    Success { answer: String },
    Failure { error_detail: String },
}

impl ChatOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ChatOutcome::Success { .. })
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Turn an HTTP status and body into a tagged outcome
///
/// Only a success status with a first choice carrying content is a
/// `Success`; everything else becomes a `Failure` with whatever detail the
/// payload offers.
pub fn decode_response(status: u16, body: &str) -> ChatOutcome {
    let response: WireResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            return ChatOutcome::Failure {
                error_detail: format!(
                    "unreadable response (HTTP {status}): {e}; body starts with '{}'",
                    excerpt(body)
                ),
            };
        }
    };

    let answer = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content);

    match (answer, response.error) {
        (Some(answer), None) if (200..300).contains(&status) => ChatOutcome::Success {
            answer: answer.trim().to_string(),
        },
        (_, Some(error)) => ChatOutcome::Failure {
            error_detail: error
                .message
                .or(error.kind)
                .unwrap_or_else(|| format!("unspecified error (HTTP {status})")),
        },
        (Some(_), None) => ChatOutcome::Failure {
            error_detail: format!("HTTP {status}"),
        },
        (None, None) => ChatOutcome::Failure {
            error_detail: format!("response (HTTP {status}) had no answer"),
        },
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
