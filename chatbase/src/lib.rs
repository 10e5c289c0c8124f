use miette::{Context, IntoDiagnostic, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION};

pub use crate::chat::{reply_text, ChatApiRequest};
pub use crate::error::ChatbaseError;

mod bot;
mod chat;
pub mod diagnose;
mod error;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub const DEFAULT_BASE_URL: &str = "https://www.chatbase.co/api/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

// Non-production fallbacks so an unconfigured checkout still starts.
const FALLBACK_API_KEY: &str = "unset-chatbase-api-key";
const FALLBACK_CHATBOT_ID: &str = "unset-chatbot-id";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_key_set: bool,
    pub chatbot_id: String,
    pub chatbot_id_set: bool,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
}

#[derive(Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CHATBASE_API_KEY").ok();
        let chatbot_id = std::env::var("CHATBOT_ID").ok();

        let temperature: f64 = match std::env::var("CHATBASE_TEMPERATURE") {
            Ok(raw) => raw
                .parse()
                .into_diagnostic()
                .wrap_err("CHATBASE_TEMPERATURE must be a number")?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        Ok(Self {
            api_key_set: api_key.is_some(),
            api_key: api_key.unwrap_or_else(|| FALLBACK_API_KEY.to_string()),
            chatbot_id_set: chatbot_id.is_some(),
            chatbot_id: chatbot_id.unwrap_or_else(|| FALLBACK_CHATBOT_ID.to_string()),
            base_url: std::env::var("CHATBASE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("CHATBASE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature,
        })
    }

    pub fn client(&self) -> Result<Client> {
        let mut headers = reqwest::header::HeaderMap::new();

        let value = format!("Bearer {}", self.api_key);
        let mut value = HeaderValue::from_str(&value)
            .into_diagnostic()
            .wrap_err("Could not create header value")?;
        value.set_sensitive(true);

        headers.insert(AUTHORIZATION, value);

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .build()
            .into_diagnostic()
            .wrap_err("Could not build reqwest client")?;

        Ok(Client {
            http,
            base_url: self.base_url.clone(),
        })
    }
}

impl Client {
    /// Sends the request and normalizes the outcome: a success body parses
    /// into JSON, an error status captures the provider's payload alongside
    /// the status code.
    pub(crate) async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, ChatbaseError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(ChatbaseError::Decode);
        }

        let text = response.text().await.unwrap_or_default();
        // The provider reports errors as JSON, but not reliably.
        let payload =
            serde_json::from_str(&text).unwrap_or_else(|_| serde_json::Value::String(text));

        Err(ChatbaseError::Api {
            status: status.as_u16(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(base_url: &str) -> Config {
        Config {
            api_key: "sk-test-0123456789".to_string(),
            api_key_set: true,
            chatbot_id: "bot-1".to_string(),
            chatbot_id_set: true,
            base_url: base_url.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[test]
    fn client_builds_from_config() {
        assert!(config_for(DEFAULT_BASE_URL).client().is_ok());
    }

    #[tokio::test]
    async fn error_status_captures_json_payload() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"message":"Chatbot not found"}"#);
        });

        let config = config_for(&server.base_url());
        let client = config.client().unwrap();
        let request = ChatApiRequest::from_history(&config, vec![shared::ChatMessage::user("hi")]);

        let err = client.chat(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.payload().unwrap()["message"], "Chatbot not found");
    }

    #[tokio::test]
    async fn error_status_with_plain_text_body_is_kept_as_string() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat");
            then.status(502).body("bad gateway");
        });

        let config = config_for(&server.base_url());
        let client = config.client().unwrap();
        let request = ChatApiRequest::from_history(&config, vec![shared::ChatMessage::user("hi")]);

        let err = client.chat(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.payload().unwrap().as_str(), Some("bad gateway"));
    }

    #[tokio::test]
    async fn unparseable_success_body_is_a_decode_error() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat");
            then.status(200).body("not json");
        });

        let config = config_for(&server.base_url());
        let client = config.client().unwrap();
        let request = ChatApiRequest::from_history(&config, vec![shared::ChatMessage::user("hi")]);

        let err = client.chat(&request).await.unwrap_err();
        assert!(matches!(err, ChatbaseError::Decode(_)));
        assert_eq!(err.status(), None);
    }
}
