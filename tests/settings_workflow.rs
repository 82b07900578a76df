use admin_panel::config::Config;
use admin_panel::env_file;
use admin_panel::screens;
use admin_panel::settings::{
    save_website, ListQuery, NewSetting, SettingType, SettingsStore, Status,
};
use serde_json::json;
use std::fs;

#[test]
fn test_configure_save_and_render() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        env_path: dir.path().join(".env"),
        settings_path: dir.path().join("settings.toml"),
        ..Config::default()
    };
    fs::write(&config.env_path, "APP_NAME=panel\nAPP_DEBUG=true\n").unwrap();

    let mut store = SettingsStore::load(&config.settings_path).unwrap();
    store.create(NewSetting::new("WEB_SITE_NAME", "Site name")).unwrap();
    store
        .create(NewSetting::new("WEB_SITE_LOGO", "Site logo").setting_type(SettingType::Picture))
        .unwrap();
    store
        .create(
            NewSetting::new("APP_DEBUG", "Debug mode")
                .setting_type(SettingType::Switch)
                .group("System"),
        )
        .unwrap();
    store.save(&config.settings_path).unwrap();

    let mut store = SettingsStore::load(&config.settings_path).unwrap();
    let values = json!({
        "WEB_SITE_NAME": "My Panel",
        "WEB_SITE_LOGO": [{"id": 31, "path": "/uploads/logo.png"}],
        "APP_DEBUG": false
    });
    let report = save_website(&mut store, &config.env_path, values.as_object().unwrap()).unwrap();
    store.save(&config.settings_path).unwrap();

    assert_eq!(report.updated.len(), 3);
    assert!(report.skipped.is_empty());

    let env = env_file::read_env(&config.env_path).unwrap();
    assert_eq!(env.get("APP_DEBUG").map(String::as_str), Some("false"));
    assert_eq!(env.get("APP_NAME").map(String::as_str), Some("panel"));

    let store = SettingsStore::load(&config.settings_path).unwrap();
    assert_eq!(store.find_by_name("WEB_SITE_LOGO").unwrap().value.as_deref(), Some("31"));

    let form = screens::website_form(&store).unwrap().render().unwrap();
    assert_eq!(form["items"][0]["title"], json!(screens::DEFAULT_GROUP));
    assert_eq!(form["items"][1]["items"][0]["content"], json!("Site name: My Panel"));
    assert_eq!(form["items"][2]["title"], json!("System"));
}

#[test]
fn test_batch_operations_reflected_in_overview() {
    let mut store = SettingsStore::new();
    for (name, group) in [("A", "One"), ("B", "One"), ("C", "Two"), ("D", "Three")] {
        store.create(NewSetting::new(name, &format!("Setting {}", name)).group(group)).unwrap();
    }

    store.set_status(&[3], Status::Disabled);
    store.delete_many(&[4]);

    let overview = screens::overview(&store).unwrap();
    let cards: Vec<&str> = overview
        .children()
        .iter()
        .filter(|n| n.kind() == "card")
        .filter_map(|n| n.get_str("title"))
        .collect();
    assert_eq!(cards, vec!["One"]);

    let page = store.list(&ListQuery { search: Some("setting".to_string()), page: 1 }, 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.last_page, 2);
}
