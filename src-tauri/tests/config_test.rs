//! 配置模块集成测试

use notelock_lib::i18n::Language;
use notelock_lib::shortcuts::ShortcutPair;
use notelock_lib::state::{AppConfig, ConfigManager, WindowConfig};

// ============================================================================
// 加载与保存
// ============================================================================

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = AppConfig::default();
    config.shortcuts = ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M");
    config.language = Language::Ukrainian;
    config.window = WindowConfig {
        width: 640,
        height: 480,
        x: Some(100),
        y: Some(50),
    };

    ConfigManager::save_to(&path, &config).unwrap();
    let loaded = ConfigManager::load_from(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");

    let config = ConfigManager::load_from(&path).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.shortcuts, ShortcutPair::defaults());
    assert_eq!(config.language, Language::English);
}

#[test]
fn test_load_invalid_json_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not valid json").unwrap();

    let config = ConfigManager::load_from(&path).unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_partial_json_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "shortcuts": { "lock": "Alt+P", "unlock": "Alt+U" } }"#,
    )
    .unwrap();

    let config = ConfigManager::load_from(&path).unwrap();

    assert_eq!(config.shortcuts, ShortcutPair::new("Alt+P", "Alt+U"));
    assert_eq!(config.language, Language::English); // 默认值
    assert_eq!(config.window, WindowConfig::default()); // 默认值
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.json");

    ConfigManager::save_to(&path, &AppConfig::default()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_saved_file_is_pretty_printed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    ConfigManager::save_to(&path, &AppConfig::default()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"shortcuts\""));
    assert!(content.contains('\n')); // pretty-printed
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(parsed.get("language").is_some());
}
