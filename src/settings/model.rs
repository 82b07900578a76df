//! Configuration setting records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form control used to edit a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    #[default]
    Text,
    Textarea,
    Picture,
    File,
    Switch,
}

impl SettingType {
    pub const ALL: [SettingType; 5] = [
        SettingType::Text,
        SettingType::Textarea,
        SettingType::Picture,
        SettingType::File,
        SettingType::Switch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::Text => "text",
            SettingType::Textarea => "textarea",
            SettingType::Picture => "picture",
            SettingType::File => "file",
            SettingType::Switch => "switch",
        }
    }

    /// Uploads store the id of the first uploaded item
    pub fn is_upload(&self) -> bool {
        matches!(self, SettingType::Picture | SettingType::File)
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown setting type '{}'. Valid types: text, textarea, picture, file, switch",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Enabled,
    Disabled,
}

impl Status {
    /// Numeric code used by the admin grid: 1 enabled, 2 disabled
    pub fn code(&self) -> u8 {
        match self {
            Status::Enabled => 1,
            Status::Disabled => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Status::Enabled),
            2 => Some(Status::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Enabled => f.write_str("enabled"),
            Status::Disabled => f.write_str("disabled"),
        }
    }
}

/// One stored configuration setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSetting {
    pub id: u64,
    pub title: String,
    /// Unique key, also used as the form field name
    pub name: String,
    #[serde(rename = "type", default)]
    pub setting_type: SettingType,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ConfigSetting {
    pub fn is_enabled(&self) -> bool {
        self.status == Status::Enabled
    }
}

/// Editable fields of a setting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewSetting {
    pub title: String,
    pub name: String,
    pub setting_type: SettingType,
    pub group_name: String,
    pub remark: String,
    pub status: Status,
}

impl NewSetting {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn setting_type(mut self, ty: SettingType) -> Self {
        self.setting_type = ty;
        self
    }

    pub fn group(mut self, group_name: &str) -> Self {
        self.group_name = group_name.to_string();
        self
    }

    pub fn remark(mut self, remark: &str) -> Self {
        self.remark = remark.to_string();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}
