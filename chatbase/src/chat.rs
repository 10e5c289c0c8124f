use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::ChatMessage;

use crate::{ChatbaseError, Client, Config};

pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound body for the provider's chat endpoint. `temperature` and `model`
/// come from the config; the chat endpoint has historically accepted requests
/// without them, so they are carried rather than required.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatApiRequest {
    pub messages: Vec<ChatMessage>,
    pub chatbot_id: String,
    pub stream: bool,
    pub temperature: f64,
    pub model: String,
}

impl ChatApiRequest {
    pub fn from_history(config: &Config, messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            chatbot_id: config.chatbot_id.clone(),
            stream: false,
            temperature: config.temperature,
            model: config.model.clone(),
        }
    }
}

/// Stripped-down chat body used by the diagnostic probes: just the history,
/// with the bot id either in the body or moved into the URL path.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct MinimalChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    chatbot_id: Option<String>,
    messages: Vec<ChatMessage>,
}

/// The provider's reply shape was never pinned down; these are the fields it
/// has been observed to use, in precedence order.
#[derive(Deserialize, Debug, Default)]
struct ReplyFields {
    text: Option<String>,
    answer: Option<String>,
    message: Option<String>,
}

/// First of `text`, `answer`, `message`; the whole raw payload when none of
/// them is present.
pub fn reply_text(raw: &serde_json::Value) -> serde_json::Value {
    let fields: ReplyFields = serde_json::from_value(raw.clone()).unwrap_or_default();

    match fields.text.or(fields.answer).or(fields.message) {
        Some(text) => serde_json::Value::String(text),
        None => raw.clone(),
    }
}

impl Client {
    pub async fn chat(&self, request: &ChatApiRequest) -> Result<serde_json::Value, ChatbaseError> {
        let url = format!("{}/chat", self.base_url);
        self.execute(self.http.post(url).timeout(CHAT_TIMEOUT).json(request))
            .await
    }

    /// Probe variant: minimal single-message chat with the bot id in the body.
    pub async fn minimal_chat(&self, chatbot_id: &str) -> Result<serde_json::Value, ChatbaseError> {
        let url = format!("{}/chat", self.base_url);
        let body = MinimalChatRequest {
            chatbot_id: Some(chatbot_id.to_string()),
            messages: vec![ChatMessage::user("test")],
        };
        self.execute(self.http.post(url).timeout(PROBE_TIMEOUT).json(&body))
            .await
    }

    /// Probe variant: same minimal chat, bot id in the URL path instead.
    pub async fn minimal_chat_in_path(
        &self,
        chatbot_id: &str,
    ) -> Result<serde_json::Value, ChatbaseError> {
        let url = format!("{}/chat/{}", self.base_url, chatbot_id);
        let body = MinimalChatRequest {
            chatbot_id: None,
            messages: vec![ChatMessage::user("test")],
        };
        self.execute(self.http.post(url).timeout(PROBE_TIMEOUT).json(&body))
            .await
    }
}
