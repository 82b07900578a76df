pub mod config;
pub mod layout;
pub mod save;
pub mod settings;

use admin_panel::config::Config;
use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Cli;

/// Effective configuration for one invocation: the config file with any
/// command-line overrides applied
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        let mut config = Config::load_from(&config_path)?;

        if let Some(settings) = &cli.settings {
            config.settings_path = settings.clone();
        }
        if let Some(env) = &cli.env {
            config.env_path = env.clone();
        }

        Ok(Self { config, config_path })
    }
}
