use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Inbound chat body. Callers send either a single `message` or the full
/// `conversation` history; the relay keeps no session state between calls.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Vec<ChatMessage>>,
}

impl ChatRequest {
    /// Resolves the body into the outbound history. A lone `message` becomes
    /// a one-element conversation with role "user"; a `conversation` is used
    /// verbatim. `None` when the body carried neither.
    pub fn into_messages(self) -> Option<Vec<ChatMessage>> {
        match (self.message, self.conversation) {
            (Some(message), _) => Some(vec![ChatMessage::user(message)]),
            (None, Some(conversation)) => Some(conversation),
            (None, None) => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: serde_json::Value,
    pub raw_response: serde_json::Value,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(
        default,
        rename = "chatbaseError",
        skip_serializing_if = "Option::is_none"
    )]
    pub chatbase_error: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Failed,
}

/// Outcome of one request-shape probe against the provider.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProbeResult {
    pub test: String,
    pub status: ProbeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    #[serde(default, rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ProbeResult {
    pub fn success(test: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            test: test.into(),
            status: ProbeStatus::Success,
            data: Some(data),
            error: None,
            status_code: None,
        }
    }

    pub fn failure(
        test: impl Into<String>,
        error: serde_json::Value,
        status_code: Option<u16>,
    ) -> Self {
        Self {
            test: test.into(),
            status: ProbeStatus::Failed,
            data: None,
            error: Some(error),
            status_code,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsEcho {
    pub api_key: String,
    pub chatbot_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DiagnosticsReport {
    pub diagnosis: String,
    pub credentials: CredentialsEcho,
    pub tests: Vec<ProbeResult>,
    pub recommendation: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EnvFlags {
    #[serde(rename = "CHATBASE_API_KEY")]
    pub chatbase_api_key: String,
    #[serde(rename = "CHATBOT_ID")]
    pub chatbot_id: String,
}

impl EnvFlags {
    pub fn flag(set: bool) -> String {
        if set { "Set" } else { "Not Set" }.to_string()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub timestamp: String,
    pub deployment_id: String,
    pub git_commit: String,
    pub region: String,
    pub server_version: String,
    pub message: String,
    pub chat_endpoint_version: String,
    pub last_updated: String,
    pub environment_variables: EnvFlags,
}
