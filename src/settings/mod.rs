//! Configuration settings: records, store and the website form save

pub mod model;
pub mod save;
pub mod store;

pub use model::{ConfigSetting, NewSetting, SettingType, Status};
pub use save::{save_website, SaveReport};
pub use store::{ListQuery, Page, SettingsStore};
