//! 全局快捷键模块
//!
//! 提供锁定/解锁快捷键对的注册、运行时重绑定与回滚保障
//!
//! # 功能
//!
//! - 锁定热键：把便签窗口钉到桌面背景
//! - 解锁热键：恢复普通窗口模式
//! - 事务式重配置：新对要么全部生效并提交，要么回滚恢复旧对
//!
//! # 使用方法
//!
//! ```ignore
//! use notelock_lib::shortcuts::{setup_shortcuts, ShortcutPair};
//!
//! // 在 Tauri setup 中注册启动快捷键对
//! tauri::Builder::default()
//!     .setup(|app| {
//!         setup_shortcuts(app.handle(), &ShortcutPair::defaults());
//!         Ok(())
//!     })
//! ```

mod error;
mod handlers;
mod manager;
mod pair;
mod registry;

pub use error::{ShortcutError, ShortcutErrorKind, ShortcutResult};
pub use handlers::{setup_shortcuts, teardown_shortcuts, SharedShortcutManager};
pub use manager::{FieldErrors, FieldFlags, ReconfigureResult, ShortcutManager};
pub use pair::{normalize_accelerator, ShortcutPair, DEFAULT_LOCK, DEFAULT_UNLOCK};
pub use registry::{GlobalShortcutRegistry, HotkeyHandler, HotkeyRegistry};
