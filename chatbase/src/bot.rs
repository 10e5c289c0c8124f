use std::time::Duration;

use crate::{ChatbaseError, Client};

pub const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

impl Client {
    /// Looks up the chatbot's metadata by id. Mostly useful for checking that
    /// the configured credentials can see the bot at all.
    pub async fn bot_metadata(&self, chatbot_id: &str) -> Result<serde_json::Value, ChatbaseError> {
        let url = format!("{}/chatbot/{}", self.base_url, chatbot_id);
        self.execute(self.http.get(url).timeout(METADATA_TIMEOUT)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

    #[tokio::test]
    async fn bot_metadata_sends_bearer_auth() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/chatbot/bot-1")
                .header("authorization", "Bearer sk-test-0123456789");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"name":"Support Bot"}"#);
        });

        let config = Config {
            api_key: "sk-test-0123456789".to_string(),
            api_key_set: true,
            chatbot_id: "bot-1".to_string(),
            chatbot_id_set: true,
            base_url: server.base_url(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        };
        let client = config.client().unwrap();

        let metadata = client.bot_metadata("bot-1").await.unwrap();
        mock.assert();
        assert_eq!(metadata["name"], "Support Bot");
    }
}
