//! 全局错误处理模块
//!
//! 提供统一的应用错误类型和面向前端的错误上下文
//!
//! # 功能
//!
//! - 统一的 `AppError` 类型，聚合所有模块错误
//! - 错误代码用于前端处理
//! - 用户可见文案走本地化词典，而不是硬编码字符串

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{self, Language};
use crate::notes::NoteError;
use crate::shortcuts::ShortcutError;
use crate::state::ConfigError;
use crate::tray::TrayError;
use crate::window::WindowError;

/// 应用错误类型
///
/// 聚合所有模块的错误类型，提供统一的错误处理接口
#[derive(Error, Debug)]
pub enum AppError {
    /// 快捷键错误
    #[error("Shortcut error: {0}")]
    Shortcut(#[from] ShortcutError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 便签存储错误
    #[error("Note error: {0}")]
    Note(#[from] NoteError),

    /// 托盘错误
    #[error("Tray error: {0}")]
    Tray(#[from] TrayError),

    /// 窗口错误
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 错误代码
///
/// 用于前端识别和处理特定错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 快捷键配置或注册失败
    ShortcutFailed,
    /// 配置保存失败
    ConfigSaveFailed,
    /// 便签读写失败
    NoteStorageFailed,
    /// 托盘操作失败
    TrayFailed,
    /// 窗口操作失败
    WindowFailed,
    /// 内部错误
    InternalError,
}

/// 错误上下文信息
///
/// 命令层返回给前端的结构化错误：代码 + 本地化文案 + 详细信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// 错误代码
    pub code: ErrorCode,
    /// 本地化的用户文案
    pub message: String,
    /// 详细错误信息（用于日志与问题反馈）
    pub detail: String,
}

impl AppError {
    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Shortcut(_) => ErrorCode::ShortcutFailed,
            AppError::Config(_) => ErrorCode::ConfigSaveFailed,
            AppError::Note(_) => ErrorCode::NoteStorageFailed,
            AppError::Tray(_) => ErrorCode::TrayFailed,
            AppError::Window(_) => ErrorCode::WindowFailed,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// 用户文案的词典键
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::Shortcut(_) => "error_shortcut",
            AppError::Config(_) => "error_config_save",
            AppError::Note(_) => "error_note",
            AppError::Tray(_) => "error_tray",
            AppError::Window(_) => "error_window",
            AppError::Internal(_) => "error_internal",
        }
    }

    /// 按指定语言生成面向前端的错误上下文
    pub fn context(&self, language: Language) -> ErrorContext {
        ErrorContext {
            code: self.code(),
            message: i18n::translate(language, self.message_key(), &self.to_string()),
            detail: self.to_string(),
        }
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 将任意错误消息转换为内部错误
impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
