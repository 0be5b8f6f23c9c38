mod config;

use clap::{Parser, Subcommand};
use config::ServeConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tl", version, about = "Equipment event timeline API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the OpenAPI document.
    Openapi,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { config } => {
            let config = match ServeConfig::load(config.as_deref()) {
                Ok(config) => config,
                Err(err) => {
                    tracing::error!(error = %err, "config error");
                    std::process::exit(1);
                }
            };
            let state = tl_serve::AppState::new(
                config.db_path.clone(),
                config.links.clone(),
                config.request_timeout(),
            );
            if let Err(err) = tl_serve::serve(state, config.addr()).await {
                tracing::error!(error = %err, "serve error");
                std::process::exit(1);
            }
        }
        Command::Openapi => {
            println!("{}", tl_serve::openapi::generate_spec());
        }
    }
}
