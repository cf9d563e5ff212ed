//! 快捷键相关错误类型

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 单个字段的重配置失败原因
///
/// 出现在 [`ReconfigureResult`](super::ReconfigureResult) 的按字段诊断中，
/// 序列化为 SCREAMING_SNAKE_CASE 供前端展示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShortcutErrorKind {
    /// 候选值为空
    Empty,

    /// 锁定与解锁使用了同一个加速键
    SameAsOther,

    /// 系统注册表拒绝注册（通常已被其他进程占用）
    RegisterFailed,

    /// 回滚时恢复旧快捷键失败（操作窗口内被其他进程抢占）
    RestoreFailed,
}

/// 快捷键相关错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShortcutError {
    /// 无效的加速键格式
    #[error("Invalid accelerator format: {0}")]
    InvalidAccelerator(String),

    /// 全局快捷键插件不可用
    #[error("Global shortcut plugin is not available")]
    PluginNotAvailable,

    /// 快捷键管理器尚未初始化
    #[error("Shortcut manager is not initialized")]
    NotInitialized,
}

/// 快捷键模块的结果类型
pub type ShortcutResult<T> = Result<T, ShortcutError>;
