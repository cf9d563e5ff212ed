//! Tauri 命令模块
//!
//! 提供前端可调用的 Tauri 命令
//!
//! # 模块结构
//!
//! - `shortcuts` - 快捷键查询与重绑定命令
//! - `notes` - 便签读写命令
//! - `window` - 窗口管理命令
//! - `language` - 语言命令

pub mod language;
pub mod notes;
pub mod shortcuts;
pub mod window;

pub use language::*;
pub use notes::*;
pub use shortcuts::*;
pub use window::*;
