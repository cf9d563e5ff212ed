//! 窗口控制器
//!
//! 实现钉住/取消钉住的窗口操作、窗口位置与尺寸的持久化恢复。
//! 两个热键回调和前端命令都汇聚到这里。

use std::sync::Arc;

use tauri::{AppHandle, Emitter, Manager, PhysicalPosition, PhysicalSize, Runtime};

use super::desktop;
use super::mode::{WindowMode, WindowModeManager};
use crate::state::{ConfigManager, GlobalConfig, WindowConfig};

/// 主窗口标签
pub const MAIN_WINDOW: &str = "main";

/// 钉住状态变更事件（payload 为布尔值）
pub const PIN_STATE_EVENT: &str = "pin-state-changed";

/// 初始化窗口模式管理器并装入应用状态
pub fn setup_window_mode(app: &AppHandle) {
    app.manage(Arc::new(WindowModeManager::new()));
}

/// 进入钉住模式
///
/// 已处于钉住模式时为幂等空操作。把窗口设为忽略鼠标输入、
/// 挂到桌面背景，并向前端广播状态变更。
pub fn enter_pinned_mode(app: &AppHandle) {
    let Some(mode_manager) = app.try_state::<Arc<WindowModeManager>>() else {
        tracing::warn!("WindowModeManager not available, ignoring lock request");
        return;
    };

    if mode_manager.current().is_pinned() {
        tracing::debug!("Already pinned, ignoring lock request");
        return;
    }

    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        tracing::warn!(window = MAIN_WINDOW, "Main window not found");
        return;
    };

    if let Err(e) = mode_manager.transition(WindowMode::Pinned) {
        tracing::warn!(error = %e, "Pin transition rejected");
        return;
    }

    if let Err(e) = window.set_ignore_cursor_events(true) {
        tracing::warn!(error = %e, "Failed to disable cursor events");
    }
    if let Err(e) = desktop::attach_to_desktop(&window) {
        tracing::warn!(error = %e, "Failed to attach window to desktop");
    }

    let _ = app.emit(PIN_STATE_EVENT, true);
}

/// 退出钉住模式
///
/// 不在钉住模式时为幂等空操作。恢复鼠标输入与普通窗口层级。
pub fn exit_pinned_mode(app: &AppHandle) {
    let Some(mode_manager) = app.try_state::<Arc<WindowModeManager>>() else {
        tracing::warn!("WindowModeManager not available, ignoring unlock request");
        return;
    };

    if !mode_manager.current().is_pinned() {
        tracing::debug!("Not pinned, ignoring unlock request");
        return;
    }

    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        tracing::warn!(window = MAIN_WINDOW, "Main window not found");
        return;
    };

    if let Err(e) = mode_manager.transition(WindowMode::Normal) {
        tracing::warn!(error = %e, "Unpin transition rejected");
        return;
    }

    if let Err(e) = window.set_ignore_cursor_events(false) {
        tracing::warn!(error = %e, "Failed to restore cursor events");
    }
    if let Err(e) = desktop::detach_from_desktop(&window) {
        tracing::warn!(error = %e, "Failed to detach window from desktop");
    }
    if let Err(e) = window.set_always_on_top(false) {
        tracing::warn!(error = %e, "Failed to clear always-on-top");
    }

    let _ = app.emit(PIN_STATE_EVENT, false);
}

/// 检查当前是否处于钉住模式
pub fn is_pinned(app: &AppHandle) -> bool {
    app.try_state::<Arc<WindowModeManager>>()
        .map(|manager| manager.current().is_pinned())
        .unwrap_or(false)
}

/// 启动时恢复持久化的窗口位置与尺寸
pub fn restore_window_bounds(app: &AppHandle, bounds: &WindowConfig) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        tracing::warn!(window = MAIN_WINDOW, "Main window not found, skipping bounds restore");
        return;
    };

    if let Err(e) = window.set_size(PhysicalSize::new(bounds.width, bounds.height)) {
        tracing::warn!(error = %e, "Failed to restore window size");
    }

    if let (Some(x), Some(y)) = (bounds.x, bounds.y) {
        if let Err(e) = window.set_position(PhysicalPosition::new(x, y)) {
            tracing::warn!(error = %e, "Failed to restore window position");
        }
    }

    tracing::debug!(
        width = bounds.width,
        height = bounds.height,
        "Window bounds restored"
    );
}

/// 把窗口当前位置与尺寸写入配置
///
/// 在移动/缩放事件中调用；失败只记日志，不打断窗口操作。
pub fn persist_window_bounds<R: Runtime>(window: &tauri::Window<R>) {
    let app = window.app_handle();

    let Some(global) = app.try_state::<Arc<GlobalConfig>>() else {
        return;
    };

    let (Ok(position), Ok(size)) = (window.outer_position(), window.outer_size()) else {
        return;
    };

    let mut config = (*global.get()).clone();
    config.window = WindowConfig {
        width: size.width,
        height: size.height,
        x: Some(position.x),
        y: Some(position.y),
    };
    global.update(config.clone());

    if let Err(e) = ConfigManager::save(app, &config) {
        tracing::warn!(error = %e, "Failed to persist window bounds");
    }
}
