use shared::ProbeResult;

use crate::{ChatbaseError, Client};

pub const PROBE_BOT_METADATA: &str = "Get Chatbot Info";
pub const PROBE_CHAT_BODY_ID: &str = "Minimal Chat Request";
pub const PROBE_CHAT_PATH_ID: &str = "Chat with ID in URL";

/// Runs the three request-shape probes in order. Each probe is guarded on
/// its own: a failure is recorded and the next probe still runs.
pub async fn run_probes(client: &Client, chatbot_id: &str) -> Vec<ProbeResult> {
    vec![
        outcome(PROBE_BOT_METADATA, client.bot_metadata(chatbot_id).await),
        outcome(PROBE_CHAT_BODY_ID, client.minimal_chat(chatbot_id).await),
        outcome(
            PROBE_CHAT_PATH_ID,
            client.minimal_chat_in_path(chatbot_id).await,
        ),
    ]
}

fn outcome(test: &str, result: Result<serde_json::Value, ChatbaseError>) -> ProbeResult {
    match result {
        Ok(data) => ProbeResult::success(test, data),
        Err(err) => {
            tracing::warn!(probe = test, error = %err, "probe failed");
            let status = err.status();
            let detail = match err.payload() {
                Some(payload) => payload.clone(),
                None => serde_json::Value::String(err.to_string()),
            };
            ProbeResult::failure(test, detail, status)
        }
    }
}

/// Echo of the configured key safe enough to put in a response body: a short
/// prefix followed by a redaction marker.
pub fn redacted_key(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(8).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
    use shared::ProbeStatus;

    #[test]
    fn redaction_keeps_an_eight_char_prefix() {
        assert_eq!(redacted_key("41d825f9-ed60-40ce"), "41d825f9...");
        assert_eq!(redacted_key("short"), "short...");
    }

    #[tokio::test]
    async fn one_failing_probe_does_not_mask_the_others() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/chatbot/bot-1");
            then.status(401)
                .header("content-type", "application/json")
                .body(r#"{"message":"Unauthorized"}"#);
        });
        server.mock(|when, then| {
            when.method(POST).path("/chat");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"text":"hi"}"#);
        });
        server.mock(|when, then| {
            when.method(POST).path("/chat/bot-1");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"message":"Not found"}"#);
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

        let results = run_probes(&client, "bot-1").await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].test, PROBE_BOT_METADATA);
        assert_eq!(results[0].status, ProbeStatus::Failed);
        assert_eq!(results[0].status_code, Some(401));
        assert_eq!(results[0].error.as_ref().unwrap()["message"], "Unauthorized");

        assert_eq!(results[1].test, PROBE_CHAT_BODY_ID);
        assert_eq!(results[1].status, ProbeStatus::Success);
        assert_eq!(results[1].data.as_ref().unwrap()["text"], "hi");

        assert_eq!(results[2].test, PROBE_CHAT_PATH_ID);
        assert_eq!(results[2].status, ProbeStatus::Failed);
        assert_eq!(results[2].status_code, Some(404));
    }
}
