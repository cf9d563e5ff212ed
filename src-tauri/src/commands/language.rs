//! 语言相关的 Tauri 命令
//!
//! 语言切换会持久化配置、重建托盘菜单并广播给前端

use std::sync::Arc;

use tauri::{command, AppHandle, Emitter, Manager};

use crate::i18n::Language;
use crate::state::{ConfigManager, GlobalConfig};
use crate::tray;
use crate::utils::{AppError, ErrorContext};

/// 语言变更事件（payload 为语言代码）
pub const LANGUAGE_CHANGED_EVENT: &str = "language-changed";

/// 当前生效的界面语言
///
/// 配置不可用时退回默认语言，调用方拿到的永远是合法值。
pub(crate) fn active_language(app: &AppHandle) -> Language {
    app.try_state::<Arc<GlobalConfig>>()
        .map(|config| config.language())
        .unwrap_or_default()
}

/// 获取当前语言代码
#[command]
pub fn get_language(app: AppHandle) -> String {
    active_language(&app).code().to_string()
}

/// 设置界面语言
///
/// 不支持的语言代码回退到默认语言（与持久化值无效时的行为一致）。
#[command]
pub fn set_language(app: AppHandle, language: String) -> Result<String, ErrorContext> {
    let next = Language::normalize(&language).unwrap_or_default();

    let global = app
        .try_state::<Arc<GlobalConfig>>()
        .ok_or_else(|| AppError::from("Config not initialized").context(next))?;

    global.set_language(next);
    ConfigManager::save(&app, &global.get()).map_err(|e| {
        tracing::error!(error = %e, "Failed to persist language");
        AppError::from(e).context(next)
    })?;

    if let Err(e) = tray::update_tray_menu(&app, next) {
        tracing::warn!(error = %e, "Failed to rebuild tray menu after language change");
    }

    let _ = app.emit(LANGUAGE_CHANGED_EVENT, next.code());

    tracing::info!(language = next.code(), "Language changed");
    Ok(next.code().to_string())
}
