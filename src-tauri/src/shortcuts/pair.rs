//! 快捷键对配置模块
//!
//! 定义锁定/解锁快捷键对的数据结构和默认值

use serde::{Deserialize, Serialize};

/// 默认锁定快捷键（进入桌面钉住模式）
pub const DEFAULT_LOCK: &str = "Ctrl+Shift+P";

/// 默认解锁快捷键（退出桌面钉住模式）
pub const DEFAULT_UNLOCK: &str = "Ctrl+Shift+U";

/// 规范化加速键字符串
///
/// 去除首尾空白。空字符串表示"未设置"。
pub fn normalize_accelerator(accelerator: &str) -> String {
    accelerator.trim().to_string()
}

/// 快捷键对
///
/// 应用程序的快捷键配置单元：`lock` 进入钉住模式，`unlock` 退出。
/// 已提交的快捷键对中两个字段都不能为空且不能相同；
/// 空字段仅在启动阶段（尚未注册任何快捷键）出现。
///
/// # Examples
///
/// ```
/// use notelock_lib::shortcuts::ShortcutPair;
///
/// let pair = ShortcutPair::defaults();
/// assert_eq!(pair.lock, "Ctrl+Shift+P");
/// assert_eq!(pair.unlock, "Ctrl+Shift+U");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutPair {
    /// 锁定快捷键
    pub lock: String,

    /// 解锁快捷键
    pub unlock: String,
}

impl ShortcutPair {
    /// 创建新的快捷键对
    pub fn new(lock: impl Into<String>, unlock: impl Into<String>) -> Self {
        Self {
            lock: lock.into(),
            unlock: unlock.into(),
        }
    }

    /// 固定的默认快捷键对
    pub fn defaults() -> Self {
        Self::new(DEFAULT_LOCK, DEFAULT_UNLOCK)
    }

    /// 两个字段均为空的"未设置"状态
    ///
    /// 仅用于启动阶段，表示尚无任何已注册的快捷键。
    pub fn unset() -> Self {
        Self::new("", "")
    }

    /// 返回规范化后的副本（两个字段均去除空白）
    pub fn normalized(&self) -> Self {
        Self {
            lock: normalize_accelerator(&self.lock),
            unlock: normalize_accelerator(&self.unlock),
        }
    }

    /// 检查两个字段是否均为空
    pub fn is_unset(&self) -> bool {
        self.lock.is_empty() && self.unlock.is_empty()
    }
}

impl Default for ShortcutPair {
    /// 默认值即固定的默认快捷键对
    ///
    /// 配置文件缺失 `shortcuts` 段时回退到这里。
    fn default() -> Self {
        Self::defaults()
    }
}
