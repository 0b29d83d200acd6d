//! Service entry point: CLI parsing, logging bootstrap and the serve loop.

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use profile_backend::server::{self, AppConfig};

/// Profile management microservice.
#[derive(Parser)]
#[command(name = "profile-backend", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP and gRPC servers.
    Serve,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = AppConfig::from_env().map_err(std::io::Error::other)?;
            server::run(config).await
        }
    }
}
