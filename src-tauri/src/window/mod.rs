//! 窗口模块
//!
//! 提供钉住模式状态机、窗口控制和桌面背景挂载功能
//!
//! # 子模块
//!
//! - [`mode`] - 窗口模式状态机（Normal ↔ Pinned）
//! - [`controller`] - 钉住/取消钉住操作与窗口位置持久化
//! - [`desktop`] - 平台相关的桌面背景挂载
//! - [`error`] - 错误类型定义

mod controller;
mod desktop;
mod error;
mod mode;

pub use controller::{
    enter_pinned_mode, exit_pinned_mode, is_pinned, persist_window_bounds, restore_window_bounds,
    setup_window_mode, MAIN_WINDOW, PIN_STATE_EVENT,
};
pub use error::{WindowError, WindowResult};
pub use mode::{WindowMode, WindowModeManager};
