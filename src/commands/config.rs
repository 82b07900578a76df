use admin_panel::config::Config;
use anyhow::Result;
use colored::Colorize;
use log::info;

use super::Context;
use crate::cli::commands::config::ConfigSubcommands;

pub fn config_command(ctx: &Context, command: ConfigSubcommands) -> Result<()> {
    match command {
        ConfigSubcommands::Show => {
            println!("Config file:   {:?}", ctx.config_path);
            println!("Env file:      {:?}", ctx.config.env_path);
            println!("Settings file: {:?}", ctx.config.settings_path);
            println!("Page size:     {}", ctx.config.page_size);
            Ok(())
        }
        ConfigSubcommands::Init { force } => {
            info!("Initialising config at {:?}", ctx.config_path);

            if ctx.config_path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {:?} (use --force to overwrite)",
                    ctx.config_path
                );
            }
            Config::default().save_to(&ctx.config_path)?;
            println!("{}", format!("✓ Wrote default config to {:?}", ctx.config_path).green());
            Ok(())
        }
    }
}
