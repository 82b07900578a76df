use admin_panel::layout::{default_registry, Node};
use admin_panel::screens;
use admin_panel::settings::SettingsStore;
use anyhow::Result;
use colored::Colorize;
use log::info;

use super::Context;

/// List registered layout kinds
///
/// # Returns
/// * `Ok(())` - Kinds displayed successfully
pub fn kinds_command() -> Result<()> {
    info!("Listing layout kinds");

    let registry = default_registry();
    println!("{}", "Layout kinds:".bold());
    for def in registry.list() {
        let shape = if def.composite { "composite" } else { "leaf" };
        println!("  {:<40} {:<10} {}", def.signature().cyan(), shape, def.description.dimmed());
    }
    println!("\nTotal kinds: {}", registry.len());
    Ok(())
}

/// Print the settings overview layout
///
/// # Returns
/// * `Ok(())` - Layout printed as JSON
/// * `Err(anyhow::Error)` - Settings could not be loaded or the layout failed to build
pub fn overview_command(ctx: &Context) -> Result<()> {
    info!("Rendering settings overview");
    let store = SettingsStore::load(&ctx.config.settings_path)?;
    print_layout(&screens::overview(&store)?)
}

/// Print the website settings form layout
///
/// # Returns
/// * `Ok(())` - Layout printed as JSON
/// * `Err(anyhow::Error)` - Settings could not be loaded or the layout failed to build
pub fn website_command(ctx: &Context) -> Result<()> {
    info!("Rendering website settings form");
    let store = SettingsStore::load(&ctx.config.settings_path)?;
    print_layout(&screens::website_form(&store)?)
}

fn print_layout(node: &Node) -> Result<()> {
    println!("{}", node.to_json_pretty()?);
    Ok(())
}
