//! LLM-backed decisions over an OpenAI-compatible chat completions API.

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use super::{
    DecisionProvider, DecisionRequest,
    errors::{DecisionError, DecisionResult},
};
use crate::game::entities::{Action, Street};

/// Language model connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmConfig {
    /// Base URL, without the `/chat/completions` suffix
    pub api_base: String,

    pub model: String,

    pub api_key: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Per-request timeout. `None` waits for as long as the server takes.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000/v1".to_string(),
            model: "meta-llama/Llama-3.1-8B-Instruct".to_string(),
            api_key: "NONE".to_string(),
            temperature: 0.2,
            max_tokens: 2048,
            timeout_secs: None,
        }
    }
}

/// A worked example shown to the model before the real question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demo {
    pub personality: String,
    pub hole_cards: String,
    pub street: String,
    pub board: String,
    pub action: String,
}

/// Prompt material for one street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetProgram {
    #[serde(default = "default_instructions")]
    pub instructions: String,

    #[serde(default)]
    pub demos: Vec<Demo>,
}

impl Default for StreetProgram {
    fn default() -> Self {
        Self {
            instructions: default_instructions(),
            demos: Vec::new(),
        }
    }
}

fn default_instructions() -> String {
    "You are a poker player. Given your personality, hole cards, the street and the board, \
     decide your next action."
        .to_string()
}

/// A compiled per-street policy, loaded from a JSON artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyProgram {
    #[serde(default)]
    pub preflop: StreetProgram,
    #[serde(default)]
    pub flop: StreetProgram,
    #[serde(default)]
    pub turn: StreetProgram,
    #[serde(default)]
    pub river: StreetProgram,
}

impl PolicyProgram {
    pub fn load(path: &Path) -> DecisionResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| DecisionError::Artifact(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|err| DecisionError::Artifact(format!("{}: {err}", path.display())))
    }

    #[must_use]
    pub fn for_street(&self, street: Street) -> &StreetProgram {
        match street {
            Street::Preflop => &self.preflop,
            Street::Flop => &self.flop,
            Street::Turn => &self.turn,
            Street::River => &self.river,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize, Serialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Asks a chat model for each decision, one prompt program per street.
#[derive(Debug)]
pub struct ChatPolicy {
    client: Client,
    config: LmConfig,
    program: PolicyProgram,
}

impl ChatPolicy {
    pub fn new(config: LmConfig, program: PolicyProgram) -> DecisionResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            program,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LmConfig {
        &self.config
    }

    fn messages(&self, request: &DecisionRequest<'_>) -> Vec<ChatMessage> {
        let program = self.program.for_street(request.street);
        let labels: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();
        let system = format!(
            "{}\nAnswer with exactly one of: {}.",
            program.instructions,
            labels.join(", ")
        );

        let mut messages = vec![ChatMessage::new("system", system)];
        for demo in &program.demos {
            messages.push(ChatMessage::new(
                "user",
                format!(
                    "personality: {}\nhole_cards: {}\nstreet: {}\nboard: {}",
                    demo.personality, demo.hole_cards, demo.street, demo.board
                ),
            ));
            messages.push(ChatMessage::new("assistant", demo.action.clone()));
        }
        messages.push(ChatMessage::new("user", request.to_string()));
        messages
    }
}

impl DecisionProvider for ChatPolicy {
    fn decide(&mut self, request: &DecisionRequest<'_>) -> DecisionResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: self.messages(request),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));
        let response: ChatResponse = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DecisionError::Unavailable("Empty chat completion".to_string()))?;
        debug!("{} on the {}: {content:?}", request.personality, request.street);
        Ok(extract_label(&content))
    }
}

/// Pull the action label out of a model reply: the last non-empty line,
/// without an `action:` prefix or surrounding quotes.
#[must_use]
pub fn extract_label(reply: &str) -> String {
    let line = reply
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or_default();
    let line = match line.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("action:") => &line[7..],
        _ => line,
    };
    line.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*' | '.'))
        .to_string()
}
