use axum::{
    http::{header, Method},
    routing::{any, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
mod handlers;

pub use crate::error::{AppError, AppResult};

/// Deployment metadata surfaced by the debug endpoint, read once at startup.
#[derive(Debug, Clone)]
pub struct DeploymentEnv {
    pub deployment_id: String,
    pub git_commit: String,
    pub region: String,
}

impl DeploymentEnv {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_else(|_| "unknown".to_string());
        Self {
            deployment_id: var("DEPLOYMENT_ID"),
            git_commit: var("GIT_COMMIT_SHA"),
            region: var("DEPLOY_REGION"),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: chatbase::Config,
    pub client: chatbase::Client,
    pub deployment: DeploymentEnv,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/chat",
            post(handlers::chat).options(handlers::preflight),
        )
        .route("/api/diagnose", any(handlers::diagnose))
        .route("/api/debug", any(handlers::deployment_info))
        .layer(cors)
        .with_state(state)
}
