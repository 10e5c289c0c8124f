use clap::Parser;
use miette::{IntoDiagnostic, Result};
use server::{AppState, DeploymentEnv};

#[derive(Parser, Debug)]
#[command(name = "relay-server", about = "HTTP relay in front of the Chatbase chat API")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,chatbase=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let config = chatbase::Config::from_env()?;
    if !config.api_key_set || !config.chatbot_id_set {
        tracing::warn!("CHATBASE_API_KEY or CHATBOT_ID not set, using placeholder fallbacks");
    }

    let client = config.client()?;
    let state = AppState {
        config,
        client,
        deployment: DeploymentEnv::from_env(),
    };

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!(%addr, "listening");

    axum::Server::bind(&addr)
        .serve(server::router(state).into_make_service())
        .await
        .into_diagnostic()?;

    Ok(())
}
