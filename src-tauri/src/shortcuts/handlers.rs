//! 快捷键处理器与启动装配
//!
//! 构造锁定/解锁两个热键回调，在 Tauri setup 阶段把管理器装入
//! 应用状态，并在进程退出时注销快捷键。

use std::sync::{Arc, Mutex};

use tauri::{AppHandle, Manager};

use super::manager::ShortcutManager;
use super::pair::ShortcutPair;
use super::registry::{GlobalShortcutRegistry, HotkeyHandler};
use crate::window;

/// 装入 Tauri 管理状态的共享管理器
///
/// 整个 注销→注册→回滚 序列在 OS 层面不是原子的，
/// 互斥锁把并发的第二次重配置调用串行化。
pub type SharedShortcutManager = Mutex<ShortcutManager<GlobalShortcutRegistry>>;

/// 锁定热键回调：请求进入桌面钉住模式
///
/// 已处于钉住模式时为幂等空操作（由窗口控制器判断）。
fn lock_handler(app: &AppHandle) -> HotkeyHandler {
    let app = app.clone();
    Arc::new(move || {
        tracing::debug!("Lock hotkey pressed");
        window::enter_pinned_mode(&app);
    })
}

/// 解锁热键回调：请求退出桌面钉住模式
///
/// 不在钉住模式时为幂等空操作。
fn unlock_handler(app: &AppHandle) -> HotkeyHandler {
    let app = app.clone();
    Arc::new(move || {
        tracing::debug!("Unlock hotkey pressed");
        window::exit_pinned_mode(&app);
    })
}

/// 初始化快捷键子系统
///
/// 创建管理器、注册启动时的快捷键对（持久化值或默认值），
/// 并把管理器装入应用状态。启动注册失败不是致命错误：
/// 记录警告，用户可以在设置中重新绑定。
pub fn setup_shortcuts(app: &AppHandle, initial: &ShortcutPair) {
    let registry = GlobalShortcutRegistry::new(app.clone());
    let mut manager = ShortcutManager::new(registry, lock_handler(app), unlock_handler(app));

    let result = manager.reconfigure(initial.clone());
    if result.ok {
        tracing::info!(
            lock = %initial.lock,
            unlock = %initial.unlock,
            "Startup shortcut pair registered"
        );
    } else {
        tracing::warn!(
            lock = %initial.lock,
            unlock = %initial.unlock,
            errors = ?result.errors,
            "Startup shortcut registration failed, no hotkeys active until rebound"
        );
    }

    app.manage(SharedShortcutManager::new(manager));
}

/// 进程退出时注销当前快捷键对
pub fn teardown_shortcuts(app: &AppHandle) {
    if let Some(state) = app.try_state::<SharedShortcutManager>() {
        match state.lock() {
            Ok(mut manager) => manager.teardown(),
            Err(poisoned) => poisoned.into_inner().teardown(),
        }
    }
}
