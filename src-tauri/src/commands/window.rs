//! 窗口相关的 Tauri 命令
//!
//! 提供前端调用的窗口管理命令

use tauri::{command, AppHandle};
use tauri_plugin_shell::ShellExt;

use crate::tray;
use crate::window;

/// 钉住/取消钉住便签窗口
#[command]
pub fn toggle_pin(app: AppHandle, pinned: bool) {
    if pinned {
        window::enter_pinned_mode(&app);
    } else {
        window::exit_pinned_mode(&app);
    }
}

/// 隐藏主窗口到托盘
///
/// 钉住模式下忽略：此时窗口属于桌面背景，没有可最小化的窗口。
#[command]
pub fn minimize_window(app: AppHandle) {
    if window::is_pinned(&app) {
        tracing::debug!("Minimize ignored while pinned");
        return;
    }
    tray::hide_main_window(&app);
}

/// 退出应用
#[command]
pub fn close_window(app: AppHandle) {
    tracing::info!("User requested quit from window controls");
    app.exit(0);
}

/// 用系统默认程序打开外部链接
///
/// 只放行 http/https/mailto/tel，其余一律拒绝并返回 `false`。
#[command]
pub fn open_external(app: AppHandle, url: String) -> Result<bool, String> {
    let trimmed = url.trim();
    if !is_allowed_external_url(trimmed) {
        tracing::warn!(url = %trimmed, "Blocked external URL");
        return Ok(false);
    }

    app.shell()
        .open(trimmed, None)
        .map_err(|e| e.to_string())?;

    Ok(true)
}

/// 外部链接协议白名单检查
fn is_allowed_external_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let lower = url.to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
}
