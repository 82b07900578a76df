//! Applying a submitted website-settings form

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use super::model::{ConfigSetting, SettingType};
use super::store::SettingsStore;
use crate::env_file;

/// Setting whose value is mirrored into the env file
pub const APP_DEBUG: &str = "APP_DEBUG";

/// Outcome of [`save_website`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaveReport {
    /// Names of settings whose value was stored
    pub updated: Vec<String>,
    /// Submitted keys with no matching setting
    pub skipped: Vec<String>,
    /// Env keys rewritten
    pub env_updated: Vec<String>,
}

/// Store every submitted value on its setting.
///
/// Nothing is changed unless the env file at `env_path` is writable.
pub fn save_website(
    store: &mut SettingsStore,
    env_path: &Path,
    values: &Map<String, Value>,
) -> Result<SaveReport> {
    env_file::ensure_writable(env_path)?;

    let mut report = SaveReport::default();
    let mut pending: Vec<(String, Option<String>)> = Vec::new();
    let mut env_updates: Vec<(&str, &str)> = Vec::new();

    for (key, raw) in values {
        let Some(setting) = store.find_by_name(key) else {
            warn!("Skipping value for unknown setting: {}", key);
            report.skipped.push(key.clone());
            continue;
        };

        if setting.name == APP_DEBUG {
            env_updates.push((APP_DEBUG, if is_truthy(raw) { "true" } else { "false" }));
        }
        pending.push((key.clone(), normalize(setting, raw)));
    }

    if !env_updates.is_empty() {
        env_file::modify_env(env_path, &env_updates)?;
        report.env_updated = env_updates.iter().map(|(k, _)| k.to_string()).collect();
    }

    for (name, value) in pending {
        if store.set_value(&name, value) {
            report.updated.push(name);
        }
    }

    info!(
        "Saved {} setting(s), skipped {}",
        report.updated.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Convert a submitted form value into the stored representation
pub fn normalize(setting: &ConfigSetting, raw: &Value) -> Option<String> {
    if setting.setting_type.is_upload() {
        return match raw {
            Value::Array(items) => items.first().and_then(|item| item.get("id")).and_then(scalar),
            Value::Object(item) => item.get("id").and_then(scalar),
            _ => None,
        };
    }

    match setting.setting_type {
        SettingType::Switch => Some(if is_truthy(raw) { "1" } else { "0" }.to_string()),
        _ => match raw {
            Value::Null => None,
            Value::Array(_) | Value::Object(_) => Some(raw.to_string()),
            other => scalar(other),
        },
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "off" | "no"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::model::NewSetting;
    use serde_json::json;
    use std::fs;

    fn setting(ty: SettingType) -> ConfigSetting {
        ConfigSetting {
            id: 1,
            title: "T".to_string(),
            name: "N".to_string(),
            setting_type: ty,
            group_name: String::new(),
            remark: String::new(),
            status: Default::default(),
            value: None,
        }
    }

    #[test]
    fn test_normalize_upload_takes_first_id() {
        let picture = setting(SettingType::Picture);
        assert_eq!(
            normalize(&picture, &json!([{"id": 7, "url": "a.png"}, {"id": 8}])),
            Some("7".to_string())
        );
        assert_eq!(normalize(&picture, &json!([])), None);
        assert_eq!(normalize(&picture, &json!(null)), None);
    }

    #[test]
    fn test_normalize_switch_and_text() {
        assert_eq!(normalize(&setting(SettingType::Switch), &json!(true)), Some("1".to_string()));
        assert_eq!(normalize(&setting(SettingType::Switch), &json!("off")), Some("0".to_string()));
        assert_eq!(normalize(&setting(SettingType::Text), &json!("hi")), Some("hi".to_string()));
        assert_eq!(normalize(&setting(SettingType::Textarea), &json!(12)), Some("12".to_string()));
        assert_eq!(normalize(&setting(SettingType::Text), &json!(null)), None);
    }

    #[test]
    fn test_save_updates_store_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        fs::write(&env_path, "APP_DEBUG=false\n").unwrap();

        let mut store = SettingsStore::new();
        store.create(NewSetting::new("WEB_SITE_NAME", "Site name")).unwrap();
        store
            .create(NewSetting::new(APP_DEBUG, "Debug").setting_type(SettingType::Switch))
            .unwrap();

        let values = json!({"WEB_SITE_NAME": "Panel", "APP_DEBUG": true, "GHOST": 1});
        let report = save_website(&mut store, &env_path, values.as_object().unwrap()).unwrap();

        assert_eq!(report.skipped, vec!["GHOST".to_string()]);
        assert_eq!(report.env_updated, vec![APP_DEBUG.to_string()]);
        assert_eq!(report.updated.len(), 2);
        assert_eq!(store.find_by_name(APP_DEBUG).unwrap().value.as_deref(), Some("1"));
        assert_eq!(store.find_by_name("WEB_SITE_NAME").unwrap().value.as_deref(), Some("Panel"));
        assert_eq!(fs::read_to_string(&env_path).unwrap(), "APP_DEBUG=true\n");
    }

    #[test]
    fn test_save_requires_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::new();
        store.create(NewSetting::new("WEB_SITE_NAME", "Site name")).unwrap();

        let values = json!({"WEB_SITE_NAME": "Panel"});
        let env_path = dir.path().join(".env");
        let result = save_website(&mut store, &env_path, values.as_object().unwrap());

        assert!(result.is_err());
        assert_eq!(store.find_by_name("WEB_SITE_NAME").unwrap().value, None);
    }
}
