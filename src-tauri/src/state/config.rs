//! 应用配置模块
//!
//! 提供应用程序配置的加载、保存和管理功能
//!
//! # 配置存储位置
//!
//! - Windows: `%APPDATA%/Notelock/config.json`
//! - macOS: `~/Library/Application Support/com.notelock.app/config.json`
//! - Linux: `~/.config/notelock/config.json`
//!
//! # 持久化纪律
//!
//! 快捷键对只在重配置成功提交后写入（由命令层保证），
//! 失败的重配置尝试永远不会改变持久化状态。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager, Runtime};
use thiserror::Error;

use crate::i18n::Language;
use crate::shortcuts::ShortcutPair;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 路径错误
    #[error("Path error: {0}")]
    Path(String),
}

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 应用配置
///
/// 包含所有需要跨进程重启保留的设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 快捷键对（最后一次成功提交的值）
    pub shortcuts: ShortcutPair,
    /// 界面语言
    pub language: Language,
    /// 窗口位置与尺寸
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shortcuts: ShortcutPair::defaults(),
            language: Language::default(),
            window: WindowConfig::default(),
        }
    }
}

/// 窗口位置与尺寸配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// 窗口宽度（物理像素）
    pub width: u32,
    /// 窗口高度（物理像素）
    pub height: u32,
    /// 窗口横坐标（None 表示由系统决定）
    pub x: Option<i32>,
    /// 窗口纵坐标
    pub y: Option<i32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 500,
            x: None,
            y: None,
        }
    }
}

/// 配置管理器
///
/// 提供配置的加载、保存和路径解析
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// 从配置文件加载，文件不存在或内容无效时返回默认配置
    pub fn load<R: Runtime>(app: &AppHandle<R>) -> ConfigResult<AppConfig> {
        let path = Self::config_path(app)?;
        Self::load_from(&path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: &Path) -> ConfigResult<AppConfig> {
        tracing::debug!(path = %path.display(), "Loading config");

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Config loaded successfully");
                    Ok(config)
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Config file invalid, using defaults"
                    );
                    Ok(AppConfig::default())
                }
            }
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }

    /// 保存配置
    pub fn save<R: Runtime>(app: &AppHandle<R>, config: &AppConfig) -> ConfigResult<()> {
        let path = Self::config_path(app)?;
        Self::save_to(&path, config)
    }

    /// 保存配置到指定路径
    pub fn save_to(path: &Path, config: &AppConfig) -> ConfigResult<()> {
        tracing::debug!(path = %path.display(), "Saving config");

        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Config saved successfully");
        Ok(())
    }

    /// 获取配置文件路径
    pub fn config_path<R: Runtime>(app: &AppHandle<R>) -> ConfigResult<PathBuf> {
        let app_config_dir = app
            .path()
            .app_config_dir()
            .map_err(|e| ConfigError::Path(e.to_string()))?;

        Ok(app_config_dir.join("config.json"))
    }
}

/// 全局配置状态
///
/// 使用 ArcSwap 实现无锁读取
pub struct GlobalConfig {
    config: ArcSwap<AppConfig>,
}

impl GlobalConfig {
    /// 创建新的全局配置
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: ArcSwap::new(Arc::new(config)),
        }
    }

    /// 获取当前配置
    pub fn get(&self) -> Arc<AppConfig> {
        self.config.load_full()
    }

    /// 更新配置
    pub fn update(&self, config: AppConfig) {
        self.config.store(Arc::new(config));
    }

    /// 获取当前快捷键对
    pub fn shortcuts(&self) -> ShortcutPair {
        self.config.load().shortcuts.clone()
    }

    /// 更新快捷键对
    pub fn set_shortcuts(&self, shortcuts: ShortcutPair) {
        let mut config = (*self.config.load_full()).clone();
        config.shortcuts = shortcuts;
        self.config.store(Arc::new(config));
    }

    /// 获取当前语言
    pub fn language(&self) -> Language {
        self.config.load().language
    }

    /// 更新语言
    pub fn set_language(&self, language: Language) {
        let mut config = (*self.config.load_full()).clone();
        config.language = language;
        self.config.store(Arc::new(config));
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// 初始化配置系统
///
/// 加载配置并注册到应用状态。首次启动（尚无配置文件）时
/// 用系统区域设置推断界面语言。
pub fn init_config<R: Runtime>(app: &AppHandle<R>) -> ConfigResult<Arc<GlobalConfig>> {
    tracing::info!("Initializing config system");

    let path = ConfigManager::config_path(app)?;
    let mut config = ConfigManager::load_from(&path)?;

    if !path.exists() {
        config.language = Language::from_system();
        tracing::info!(
            language = config.language.code(),
            "First run, language taken from system locale"
        );
    }

    let global_config = Arc::new(GlobalConfig::new(config));
    app.manage(Arc::clone(&global_config));

    tracing::info!("Config system initialized");
    Ok(global_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.shortcuts, ShortcutPair::defaults());
        assert_eq!(config.language, Language::English);
        assert_eq!(config.window.width, 400);
        assert_eq!(config.window.height, 500);
        assert!(config.window.x.is_none());
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig::default();

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_partial_json() {
        // 部分 JSON 用默认值填充缺失字段
        let json = r#"{
            "language": "uk"
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.language, Language::Ukrainian);
        assert_eq!(config.shortcuts, ShortcutPair::defaults()); // 默认值
        assert_eq!(config.window.width, 400); // 默认值
    }

    #[test]
    fn test_global_config_shortcuts() {
        let global = GlobalConfig::default();

        let pair = ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M");
        global.set_shortcuts(pair.clone());

        assert_eq!(global.shortcuts(), pair);
        assert_eq!(global.get().shortcuts, pair);
    }

    #[test]
    fn test_global_config_language() {
        let global = GlobalConfig::default();
        assert_eq!(global.language(), Language::English);

        global.set_language(Language::Ukrainian);
        assert_eq!(global.language(), Language::Ukrainian);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Path("test error".to_string());
        assert!(err.to_string().contains("test error"));

        let err = ConfigError::Json(serde_json::from_str::<AppConfig>("invalid").unwrap_err());
        assert!(err.to_string().contains("JSON"));
    }
}
