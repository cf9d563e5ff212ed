//! 窗口模块错误类型

use thiserror::Error;

use super::mode::WindowMode;

/// 窗口相关错误
#[derive(Error, Debug)]
pub enum WindowError {
    /// 非法的模式转换
    #[error("Invalid window mode transition: {from:?} -> {to:?}")]
    InvalidModeTransition { from: WindowMode, to: WindowMode },

    /// 窗口未找到
    #[error("Window not found: {0}")]
    WindowNotFound(String),

    /// 桌面壳层操作失败
    #[error("Desktop shell operation failed: {0}")]
    Desktop(String),

    /// Tauri 错误
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),
}

/// 窗口模块的结果类型
pub type WindowResult<T> = Result<T, WindowError>;
