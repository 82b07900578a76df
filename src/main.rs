use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;
mod commands;

use cli::Cli;
use cli::app::Commands;
use commands::Context;

fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("admin-panel.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // Variables from .env are visible to the process, file values never override
    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env loaded: {}", e);
    }

    let cli = Cli::parse();
    info!("Starting admin-panel");

    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Kinds => commands::layout::kinds_command(),
        Commands::Overview => commands::layout::overview_command(&ctx),
        Commands::Website => commands::layout::website_command(&ctx),
        Commands::Settings(settings) => {
            commands::settings::settings_command(&ctx, settings.command)
        }
        Commands::Save { values } => commands::save::save_command(&ctx, &values),
        Commands::Config(config) => commands::config::config_command(&ctx, config.command),
    }
}
