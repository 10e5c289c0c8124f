use chatbase::{diagnose, reply_text, ChatApiRequest, Config};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use shared::ChatMessage;

#[derive(Parser, Debug)]
#[command(name = "chatbase-cli", about = "Poke the Chatbase API from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a single message and print the bot's reply.
    Chat { message: String },
    /// Run the three request-shape probes and print their outcomes.
    Diagnose,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let client = config.client()?;

    match cli.command {
        Command::Chat { message } => {
            let request = ChatApiRequest::from_history(&config, vec![ChatMessage::user(message)]);
            let raw = client.chat(&request).await?;

            match reply_text(&raw) {
                serde_json::Value::String(text) => println!("{text}"),
                other => println!("{}", serde_json::to_string_pretty(&other).into_diagnostic()?),
            }
        }
        Command::Diagnose => {
            let results = diagnose::run_probes(&client, &config.chatbot_id).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&results).into_diagnostic()?
            );
        }
    }

    Ok(())
}
