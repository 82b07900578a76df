use admin_panel::settings::{save_website, SettingsStore};
use anyhow::{Context as _, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::Path;

use super::Context;

/// Apply a submitted website settings form
///
/// # Arguments
/// * `values` - JSON file holding an object of setting name to value
///
/// # Returns
/// * `Ok(())` - Values stored and the store persisted
/// * `Err(anyhow::Error)` - Unreadable input, unwritable env file or store error
pub fn save_command(ctx: &Context, values: &Path) -> Result<()> {
    info!("Saving website settings from {:?}", values);

    let content = fs::read_to_string(values)
        .with_context(|| format!("Failed to read values file: {:?}", values))?;
    let parsed: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse values file: {:?}", values))?;
    let Some(map) = parsed.as_object() else {
        anyhow::bail!("Values file must contain a JSON object: {:?}", values);
    };

    let mut store = SettingsStore::load(&ctx.config.settings_path)?;
    let report = save_website(&mut store, &ctx.config.env_path, map)?;
    store.save(&ctx.config.settings_path)?;

    println!("{}", format!("✓ Saved {} setting(s)", report.updated.len()).green());
    if !report.env_updated.is_empty() {
        println!("Updated {:?}: {}", ctx.config.env_path, report.env_updated.join(", "));
    }
    if !report.skipped.is_empty() {
        println!("{} {}", "Skipped unknown settings:".yellow(), report.skipped.join(", "));
    }
    Ok(())
}
