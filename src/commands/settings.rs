use admin_panel::settings::{ListQuery, NewSetting, SettingType, SettingsStore, Status};
use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use log::info;

use super::Context;
use crate::cli::commands::settings::SettingsSubcommands;

pub fn settings_command(ctx: &Context, command: SettingsSubcommands) -> Result<()> {
    match command {
        SettingsSubcommands::List { search, page } => list_command(ctx, search, page),
        SettingsSubcommands::Add {
            name,
            title,
            setting_type,
            group,
            remark,
        } => {
            let setting_type: SettingType = setting_type.parse()?;
            let new = NewSetting::new(&name, &title)
                .setting_type(setting_type)
                .group(&group)
                .remark(&remark);
            add_command(ctx, new)
        }
        SettingsSubcommands::Edit {
            id,
            name,
            title,
            setting_type,
            group,
            remark,
        } => {
            let setting_type: SettingType = setting_type.parse()?;
            let changes = NewSetting::new(&name, &title)
                .setting_type(setting_type)
                .group(&group)
                .remark(&remark);
            edit_command(ctx, id, changes)
        }
        SettingsSubcommands::Enable { ids } => status_command(ctx, &ids, Status::Enabled),
        SettingsSubcommands::Disable { ids } => status_command(ctx, &ids, Status::Disabled),
        SettingsSubcommands::Delete { ids, force } => delete_command(ctx, &ids, force),
    }
}

/// List settings
///
/// # Arguments
/// * `search` - Optional title filter
/// * `page` - 1-based page number
pub fn list_command(ctx: &Context, search: Option<String>, page: usize) -> Result<()> {
    info!("Listing settings (search: {:?}, page: {})", search, page);

    let store = SettingsStore::load(&ctx.config.settings_path)?;
    let page = store.list(&ListQuery { search, page }, ctx.config.page_size);

    if page.items.is_empty() {
        println!("No settings found.");
        return Ok(());
    }

    println!(
        "{:<5} {:<24} {:<24} {:<10} {:<16} {}",
        "ID", "Title", "Name", "Type", "Group", "Status"
    );
    println!("{}", "-".repeat(90));
    for setting in &page.items {
        let status = match setting.status {
            Status::Enabled => setting.status.to_string().green(),
            Status::Disabled => setting.status.to_string().red(),
        };
        println!(
            "{:<5} {:<24} {:<24} {:<10} {:<16} {}",
            setting.id,
            setting.title,
            setting.name,
            setting.setting_type.as_str(),
            setting.group_name,
            status
        );
    }

    println!("\nPage {} of {} ({} settings)", page.page, page.last_page, page.total);
    Ok(())
}

/// Add a setting and persist the store
pub fn add_command(ctx: &Context, new: NewSetting) -> Result<()> {
    info!("Adding setting: {}", new.name);

    let mut store = SettingsStore::load(&ctx.config.settings_path)?;
    let created = store.create(new)?;
    println!(
        "{}",
        format!("✓ Created setting '{}' with id {}", created.name, created.id).green()
    );
    store.save(&ctx.config.settings_path)
}

/// Replace the definition of setting `id`
pub fn edit_command(ctx: &Context, id: u64, changes: NewSetting) -> Result<()> {
    info!("Editing setting {}", id);

    let mut store = SettingsStore::load(&ctx.config.settings_path)?;
    let updated = store.update(id, changes)?;
    println!("{}", format!("✓ Updated setting '{}' ({})", updated.name, updated.id).green());
    store.save(&ctx.config.settings_path)
}

/// Enable or disable settings in bulk
pub fn status_command(ctx: &Context, ids: &[u64], status: Status) -> Result<()> {
    info!("Setting status of {:?} to {}", ids, status);

    let mut store = SettingsStore::load(&ctx.config.settings_path)?;
    let changed = store.set_status(ids, status);
    store.save(&ctx.config.settings_path)?;

    println!("{}", format!("✓ {} setting(s) {}", changed, status).green());
    Ok(())
}

/// Delete settings in bulk, after confirmation unless `force` is set
pub fn delete_command(ctx: &Context, ids: &[u64], force: bool) -> Result<()> {
    info!("Deleting settings: {:?}", ids);

    let confirmed = force
        || Confirm::new()
            .with_prompt(format!("Delete {} setting(s)? This cannot be undone", ids.len()))
            .default(false)
            .interact()?;

    if !confirmed {
        println!("{}", "Delete cancelled".yellow());
        return Ok(());
    }

    let mut store = SettingsStore::load(&ctx.config.settings_path)?;
    let deleted = store.delete_many(ids);
    store.save(&ctx.config.settings_path)?;

    println!("{}", format!("✓ Deleted {} setting(s)", deleted).green());
    Ok(())
}
