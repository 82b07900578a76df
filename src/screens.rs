//! Settings screens described as layout trees

use crate::layout::{Col, LayoutError, Node};
use crate::settings::{ConfigSetting, SettingsStore};

/// Heading used for settings without a group
pub const DEFAULT_GROUP: &str = "Basic info";

/// Resource name the settings table refers to
pub const SETTINGS_TABLE: &str = "config";

/// Dashboard of the settings module: counts, groups and the settings table
pub fn overview(store: &SettingsStore) -> Result<Node, LayoutError> {
    let total = store.len() as u64;
    let enabled = store.enabled_count() as u64;

    Col::new(24, |c| {
        c.row(|r| {
            r.col(8, |col| {
                col.statistic("Settings", total)?;
                Ok(())
            })?;
            r.col(8, |col| {
                col.statistic("Enabled", enabled)?;
                Ok(())
            })?;
            r.col(8, |col| {
                col.statistic("Disabled", total - enabled)?;
                Ok(())
            })?;
            Ok(())
        })?;

        for group in store.group_names() {
            let titles: Vec<&str> = enabled_in(store, &group).map(|s| s.title.as_str()).collect();
            c.card(group.as_str(), titles.join(", "))?;
        }

        c.table(SETTINGS_TABLE)?;
        Ok(())
    })
}

/// The website settings form: a heading card and a row of fields per group
pub fn website_form(store: &SettingsStore) -> Result<Node, LayoutError> {
    let mut groups = Vec::new();
    if enabled_in(store, "").next().is_some() {
        groups.push((DEFAULT_GROUP.to_string(), String::new()));
    }
    groups.extend(store.group_names().into_iter().map(|g| (g.clone(), g)));

    Col::new(24, |c| {
        for (heading, group) in &groups {
            let fields: Vec<&ConfigSetting> = enabled_in(store, group).collect();
            c.card(heading.as_str(), format!("{} setting(s)", fields.len()))?;
            c.row(|r| {
                for setting in &fields {
                    r.text(format!(
                        "{}: {}",
                        setting.title,
                        setting.value.as_deref().unwrap_or("")
                    ))?
                    .set("field", setting.name.as_str())
                    .set("type", setting.setting_type.as_str());
                }
                Ok(())
            })?;
        }
        Ok(())
    })
}

fn enabled_in<'a>(
    store: &'a SettingsStore,
    group: &'a str,
) -> impl Iterator<Item = &'a ConfigSetting> + 'a {
    store
        .all()
        .iter()
        .filter(move |s| s.is_enabled() && s.group_name == group)
}
