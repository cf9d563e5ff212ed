//! 快捷键相关的 Tauri 命令
//!
//! 提供前端调用的快捷键查询与重绑定命令。
//! 持久化只在重配置成功提交后进行，失败的尝试不改变磁盘状态。

use std::sync::Arc;

use tauri::{command, AppHandle, Manager};

use crate::shortcuts::{
    ReconfigureResult, SharedShortcutManager, ShortcutError, ShortcutPair,
};
use crate::state::{ConfigManager, GlobalConfig};

/// 获取当前快捷键对
///
/// 返回最后一次成功提交的对；启动注册失败导致当前无生效对时，
/// 退回持久化的值供设置界面展示。
#[command]
pub fn get_shortcuts(app: AppHandle) -> Result<ShortcutPair, String> {
    let state = app
        .try_state::<SharedShortcutManager>()
        .ok_or_else(|| ShortcutError::NotInitialized.to_string())?;
    let manager = state.lock().map_err(|_| "Shortcut manager lock poisoned")?;

    let current = manager.current();
    if !current.is_unset() {
        return Ok(current);
    }

    let config = app
        .try_state::<Arc<GlobalConfig>>()
        .ok_or("Config not initialized")?;
    Ok(config.shortcuts())
}

/// 获取默认快捷键对
#[command]
pub fn get_default_shortcuts() -> ShortcutPair {
    ShortcutPair::defaults()
}

/// 设置快捷键对
///
/// 执行事务式重配置，只有成功提交才写入持久化配置。
#[command]
pub fn set_shortcuts(app: AppHandle, shortcuts: ShortcutPair) -> Result<ReconfigureResult, String> {
    let state = app
        .try_state::<SharedShortcutManager>()
        .ok_or_else(|| ShortcutError::NotInitialized.to_string())?;
    let mut manager = state.lock().map_err(|_| "Shortcut manager lock poisoned")?;

    let result = manager.reconfigure(shortcuts);

    if result.ok {
        let committed = manager.current();
        drop(manager);
        persist_shortcuts(&app, committed);
    }

    Ok(result)
}

/// 恢复默认快捷键对
#[command]
pub fn reset_shortcuts(app: AppHandle) -> Result<ReconfigureResult, String> {
    let state = app
        .try_state::<SharedShortcutManager>()
        .ok_or_else(|| ShortcutError::NotInitialized.to_string())?;
    let mut manager = state.lock().map_err(|_| "Shortcut manager lock poisoned")?;

    let result = manager.reset_to_defaults();

    if result.ok {
        let committed = manager.current();
        drop(manager);
        persist_shortcuts(&app, committed);
    }

    Ok(result)
}

/// 把已提交的快捷键对写入配置
///
/// 写盘失败只记日志：快捷键已经生效，下次成功保存会追平磁盘状态。
fn persist_shortcuts(app: &AppHandle, committed: ShortcutPair) {
    let Some(global) = app.try_state::<Arc<GlobalConfig>>() else {
        tracing::error!("Config not initialized, committed shortcuts not persisted");
        return;
    };

    global.set_shortcuts(committed);

    if let Err(e) = ConfigManager::save(app, &global.get()) {
        tracing::error!(error = %e, "Failed to persist committed shortcuts");
    }
}
