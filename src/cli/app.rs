use super::commands::config::ConfigCommands;
use super::commands::settings::SettingsCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "admin-panel")]
#[command(about = "Configuration settings and layout screens for the admin panel")]
pub struct Cli {
    /// Config file to use instead of the one in the platform config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings store file (overrides config)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Environment file (overrides config)
    #[arg(long, global = true)]
    pub env: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the registered layout kinds and their parameters
    Kinds,
    /// Print the settings overview layout as JSON
    Overview,
    /// Print the website settings form layout as JSON
    Website,
    /// Settings management
    Settings(SettingsCommands),
    /// Apply a submitted website settings form
    Save {
        /// JSON file holding an object of setting name to value
        values: PathBuf,
    },
    /// Configuration file management
    Config(ConfigCommands),
}
