mod cli;
mod client;
mod config;
mod dto;
mod error;
mod server;
mod transcript;
mod video;
mod youtube;

use clap::Parser;
use env_logger::Env;

use cli::{Cli, Commands};
use config::{ClientConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            server::run_server(ServerConfig::new(host, port)).await?;
        }
        Commands::Transcript {
            input,
            server_url,
            text,
        } => {
            client::run_client(ClientConfig::new(server_url, input, text)).await?;
        }
    }

    Ok(())
}
