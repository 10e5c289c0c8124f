use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chatbase::{diagnose, reply_text, ChatApiRequest};
use shared::{
    ChatRequest, ChatResponse, CredentialsEcho, DeploymentInfo, DiagnosticsReport, EnvFlags,
};

use crate::{AppError, AppResult, AppState};

/// `POST /api/chat`: forward one message or a full conversation history to
/// the provider and hand back the extracted reply plus the raw payload.
pub(crate) async fn chat(
    State(state): State<AppState>,
    body: Option<Json<ChatRequest>>,
) -> AppResult<Json<ChatResponse>> {
    let messages = body
        .and_then(|Json(body)| body.into_messages())
        .ok_or(AppError::NoContent)?;

    let request = ChatApiRequest::from_history(&state.config, messages);
    tracing::debug!(
        chatbot_id = %request.chatbot_id,
        turns = request.messages.len(),
        "forwarding chat request"
    );

    let raw = state.client.chat(&request).await?;
    let response = reply_text(&raw);

    Ok(Json(ChatResponse {
        response,
        raw_response: raw,
    }))
}

/// Non-preflight OPTIONS still gets an empty 200; the CORS layer adds the
/// headers.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// `/api/diagnose`: run the three request-shape probes and report every
/// outcome for manual inspection. Always 200; the probes guard themselves.
pub(crate) async fn diagnose(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let tests = diagnose::run_probes(&state.client, &state.config.chatbot_id).await;

    Json(DiagnosticsReport {
        diagnosis: "Chatbase API Diagnostic".to_string(),
        credentials: CredentialsEcho {
            api_key: diagnose::redacted_key(&state.config.api_key),
            chatbot_id: state.config.chatbot_id.clone(),
        },
        tests,
        recommendation: "Check which test passes to understand the correct API format".to_string(),
    })
}

/// `/api/debug`: static deployment metadata, no outbound calls.
pub(crate) async fn deployment_info(State(state): State<AppState>) -> impl IntoResponse {
    let info = DeploymentInfo {
        timestamp: chrono::Utc::now().to_rfc3339(),
        deployment_id: state.deployment.deployment_id.clone(),
        git_commit: state.deployment.git_commit.clone(),
        region: state.deployment.region.clone(),
        server_version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Chat relay deployment without HMAC request signing".to_string(),
        chat_endpoint_version: "v2-no-hmac".to_string(),
        last_updated: "2026-07-30".to_string(),
        environment_variables: EnvFlags {
            chatbase_api_key: EnvFlags::flag(state.config.api_key_set),
            chatbot_id: EnvFlags::flag(state.config.chatbot_id_set),
        },
    };

    (
        [
            (
                "cache-control",
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            ("x-deployment-id", info.deployment_id.clone()),
        ],
        Json(info),
    )
}
