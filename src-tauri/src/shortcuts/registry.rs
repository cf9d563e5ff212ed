//! 全局快捷键注册表抽象
//!
//! 把系统级热键表抽象为可注入的能力接口，
//! 生产实现基于 tauri-plugin-global-shortcut，测试替换为确定性的假注册表。

use std::sync::Arc;

use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use super::error::{ShortcutError, ShortcutResult};

/// 快捷键触发时执行的回调
pub type HotkeyHandler = Arc<dyn Fn() + Send + Sync>;

/// 系统全局热键表的能力接口
///
/// 注册是进程间排他的：一个加速键同一时间只能被一个进程持有，
/// 其他进程持有的注册对本进程不可见也不可抢占。
pub trait HotkeyRegistry {
    /// 注册加速键，成功返回 `true`
    ///
    /// 加速键无法解析或已被占用时返回 `false`，不会 panic。
    fn register(&mut self, accelerator: &str, handler: HotkeyHandler) -> bool;

    /// 注销加速键
    ///
    /// 尽力而为：加速键可能早已不存在，失败被吞掉。
    fn unregister(&mut self, accelerator: &str);

    /// 检查加速键是否已由本进程注册
    fn is_registered(&self, accelerator: &str) -> bool;
}

/// 基于 tauri-plugin-global-shortcut 的生产实现
pub struct GlobalShortcutRegistry {
    app: AppHandle,
}

impl GlobalShortcutRegistry {
    /// 创建新的注册表句柄
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    /// 解析加速键字符串为插件的 Shortcut
    fn parse(accelerator: &str) -> ShortcutResult<Shortcut> {
        accelerator
            .parse::<Shortcut>()
            .map_err(|_| ShortcutError::InvalidAccelerator(accelerator.to_string()))
    }
}

impl HotkeyRegistry for GlobalShortcutRegistry {
    fn register(&mut self, accelerator: &str, handler: HotkeyHandler) -> bool {
        let shortcut = match Self::parse(accelerator) {
            Ok(shortcut) => shortcut,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot parse accelerator");
                return false;
            }
        };

        let result = self
            .app
            .global_shortcut()
            .on_shortcut(shortcut, move |_app, _shortcut, event| {
                if event.state == ShortcutState::Pressed {
                    handler();
                }
            });

        match result {
            Ok(()) => {
                tracing::info!(accelerator = %accelerator, "Registered global shortcut");
                true
            }
            Err(e) => {
                tracing::warn!(
                    accelerator = %accelerator,
                    error = %e,
                    "Failed to register global shortcut"
                );
                false
            }
        }
    }

    fn unregister(&mut self, accelerator: &str) {
        let Ok(shortcut) = Self::parse(accelerator) else {
            return;
        };

        // 只注销我们自己持有的注册，失败不阻塞流程
        if self.app.global_shortcut().is_registered(shortcut) {
            if let Err(e) = self.app.global_shortcut().unregister(shortcut) {
                tracing::debug!(
                    accelerator = %accelerator,
                    error = %e,
                    "Unregister failed, accelerator may already be gone"
                );
            }
        }
    }

    fn is_registered(&self, accelerator: &str) -> bool {
        Self::parse(accelerator)
            .map(|shortcut| self.app.global_shortcut().is_registered(shortcut))
            .unwrap_or(false)
    }
}
