use std::fmt;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::wire::{decode_response, ChatOutcome, ChatRequest};
use super::ChatService;
use crate::error::ChatError;
use crate::profile::InvestorProfile;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Connection settings for the chat-completion service
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token. Usually supplied through `GROQ_API_KEY` rather than a
    /// config file.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
        }
    }
}

/// Blocking client for an OpenAI-compatible endpoint (Groq by default)
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    endpoint: Url,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ChatError::MissingApiKey)?;
        let endpoint = completions_endpoint(&config.base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ChatError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            endpoint,
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ChatService for CompletionClient {
    fn complete(&self, profile: InvestorProfile, question: &str) -> Result<ChatOutcome, ChatError> {
        let request = ChatRequest::for_question(&self.model, profile, question);
        debug!("POST {} (model {})", self.endpoint, self.model);

        let response = self.http.post(self.endpoint.clone()).json(&request).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        let outcome = decode_response(status, &body);
        if let ChatOutcome::Failure { error_detail } = &outcome {
            warn!("chat service returned a failure: {}", error_detail);
        }
        Ok(outcome)
    }
}

/// `{base}/chat/completions`, keeping any path already in `base`
fn completions_endpoint(base_url: &str) -> Result<Url, ChatError> {
    let invalid = |reason: String| ChatError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }

    url.join("chat/completions").map_err(|e| invalid(e.to_string()))
}
