//! In-memory settings store backed by a TOML file

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::model::{ConfigSetting, NewSetting, Status};

/// Filter and page selection for [`SettingsStore::list`]
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// 1-based page number; 0 is treated as 1
    pub page: usize,
}

/// One page of listed settings
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub items: Vec<ConfigSetting>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub last_page: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SettingsStore {
    #[serde(default)]
    settings: Vec<ConfigSetting>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading settings from: {:?}", path);

        if !path.exists() {
            info!("Settings file doesn't exist, starting empty");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        let mut store: SettingsStore = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
        store.settings.sort_by_key(|s| s.id);

        for pair in store.settings.windows(2) {
            if pair[0].id == pair[1].id {
                anyhow::bail!("Duplicate setting id {} in {:?}", pair[0].id, path);
            }
        }
        let mut names: Vec<&str> = store.settings.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
            anyhow::bail!("Duplicate setting name '{}' in {:?}", dup[0], path);
        }

        debug!("Loaded {} settings", store.settings.len());
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("Saving settings to: {:?}", path);

        let content =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;

        info!("Settings saved successfully");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn enabled_count(&self) -> usize {
        self.settings.iter().filter(|s| s.is_enabled()).count()
    }

    /// All settings ordered by id
    pub fn all(&self) -> &[ConfigSetting] {
        &self.settings
    }

    pub fn get(&self, id: u64) -> Option<&ConfigSetting> {
        self.settings.iter().find(|s| s.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ConfigSetting> {
        self.settings.iter().find(|s| s.name == name)
    }

    pub fn create(&mut self, new: NewSetting) -> Result<&ConfigSetting> {
        self.check_name(&new.name, None)?;

        let id = self.settings.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        info!("Creating setting {} ({})", new.name, id);
        self.settings.push(ConfigSetting {
            id,
            title: new.title,
            name: new.name,
            setting_type: new.setting_type,
            group_name: new.group_name,
            remark: new.remark,
            status: new.status,
            value: None,
        });

        let index = self.settings.len() - 1;
        Ok(&self.settings[index])
    }

    /// Replace the definition fields of setting `id`.
    ///
    /// The stored value and the status are kept; status changes go through
    /// [`SettingsStore::set_status`].
    pub fn update(&mut self, id: u64, changes: NewSetting) -> Result<&ConfigSetting> {
        self.check_name(&changes.name, Some(id))?;

        let setting = self
            .settings
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("Setting {} not found", id))?;

        info!("Updating setting {} ({})", changes.name, id);
        setting.title = changes.title;
        setting.name = changes.name;
        setting.setting_type = changes.setting_type;
        setting.group_name = changes.group_name;
        setting.remark = changes.remark;
        Ok(setting)
    }

    /// Store `value` on the setting called `name`. Returns false if there is none.
    pub fn set_value(&mut self, name: &str, value: Option<String>) -> bool {
        match self.settings.iter_mut().find(|s| s.name == name) {
            Some(setting) => {
                debug!("Setting value of {} to {:?}", name, value);
                setting.value = value;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: u64) -> Result<ConfigSetting> {
        let index = self
            .settings
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("Setting {} not found", id))?;

        let removed = self.settings.remove(index);
        info!("Deleted setting {} ({})", removed.name, id);
        Ok(removed)
    }

    /// Delete every setting in `ids`; unknown ids are ignored.
    /// Returns the number deleted.
    pub fn delete_many(&mut self, ids: &[u64]) -> usize {
        let before = self.settings.len();
        self.settings.retain(|s| !ids.contains(&s.id));
        let deleted = before - self.settings.len();
        info!("Deleted {} setting(s)", deleted);
        deleted
    }

    /// Set the status of every setting in `ids`. Returns the number changed.
    pub fn set_status(&mut self, ids: &[u64], status: Status) -> usize {
        let mut changed = 0;
        for setting in self.settings.iter_mut().filter(|s| ids.contains(&s.id)) {
            if setting.status != status {
                setting.status = status;
                changed += 1;
            }
        }
        info!("Set {} setting(s) to {}", changed, status);
        changed
    }

    pub fn list(&self, query: &ListQuery, page_size: usize) -> Page {
        let page_size = page_size.max(1);
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<&ConfigSetting> = self
            .settings
            .iter()
            .filter(|s| match &needle {
                Some(needle) => s.title.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect();

        let total = matching.len();
        let last_page = total.div_ceil(page_size).max(1);
        let page = query.page.max(1);
        let items = matching
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        Page {
            items,
            total,
            page,
            page_size,
            last_page,
        }
    }

    /// Distinct non-empty group names of enabled settings, in id order
    pub fn group_names(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for setting in self.settings.iter().filter(|s| s.is_enabled()) {
            if !setting.group_name.is_empty() && !groups.contains(&setting.group_name) {
                groups.push(setting.group_name.clone());
            }
        }
        groups
    }

    fn check_name(&self, name: &str, except: Option<u64>) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Setting name must not be empty");
        }
        if self
            .settings
            .iter()
            .any(|s| s.name == name && Some(s.id) != except)
        {
            anyhow::bail!("Setting '{}' already exists", name);
        }
        Ok(())
    }
}
