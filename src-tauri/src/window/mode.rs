//! 窗口模式状态机
//!
//! 便签窗口只有两种模式：普通窗口与钉在桌面背景。
//! 当前模式用 ArcSwap 实现无锁读取，变更通过 mpsc 通知监听者。

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tokio::sync::mpsc;

use super::error::{WindowError, WindowResult};

/// 窗口模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// 普通窗口：可交互、可移动
    Normal,

    /// 钉住模式：窗口挂在桌面背景后面，忽略鼠标输入
    Pinned,
}

impl WindowMode {
    /// 是否处于钉住模式
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned)
    }

    /// 模式名称（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Pinned => "Pinned",
        }
    }
}

impl Default for WindowMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// 窗口模式管理器
///
/// 持有当前模式并通知监听者。热键回调与前端命令都经由它，
/// 因此"每个进程同一时刻只有一个生效模式"由这里保证。
pub struct WindowModeManager {
    /// 当前模式（无锁读取）
    mode: ArcSwap<WindowMode>,

    /// 模式变更监听器列表
    listeners: Arc<tokio::sync::Mutex<Vec<mpsc::Sender<WindowMode>>>>,
}

impl WindowModeManager {
    /// 创建新的管理器，初始模式为普通窗口
    pub fn new() -> Self {
        Self {
            mode: ArcSwap::new(Arc::new(WindowMode::Normal)),
            listeners: Arc::new(tokio::sync::Mutex::new(Vec::new())),
        }
    }

    /// 获取当前模式
    pub fn current(&self) -> WindowMode {
        **self.mode.load()
    }

    /// 转换到新模式
    ///
    /// 只允许 Normal ↔ Pinned 之间的真实切换；
    /// 自身到自身的转换返回错误，调用方据此实现幂等空操作。
    pub fn transition(&self, new_mode: WindowMode) -> WindowResult<()> {
        let current = self.current();

        if current == new_mode {
            return Err(WindowError::InvalidModeTransition {
                from: current,
                to: new_mode,
            });
        }

        self.mode.store(Arc::new(new_mode));
        tracing::info!(from = %current.name(), to = %new_mode.name(), "Window mode changed");

        self.notify_listeners(new_mode);
        Ok(())
    }

    /// 添加模式变更监听器
    pub async fn subscribe(&self) -> mpsc::Receiver<WindowMode> {
        let (tx, rx) = mpsc::channel(8);
        let mut listeners = self.listeners.lock().await;
        listeners.push(tx);
        rx
    }

    /// 移除已关闭的监听器
    pub async fn cleanup_listeners(&self) {
        let mut listeners = self.listeners.lock().await;
        listeners.retain(|tx| !tx.is_closed());
    }

    /// 当前监听器数量
    pub async fn listener_count(&self) -> usize {
        self.listeners.lock().await.len()
    }

    /// 通知所有监听者
    ///
    /// 有 tokio 运行时则异步发送，没有（纯单元测试环境）则静默跳过
    fn notify_listeners(&self, new_mode: WindowMode) {
        let listeners = Arc::clone(&self.listeners);

        if tokio::runtime::Handle::try_current().is_ok() {
            tokio::spawn(async move {
                let listeners_guard = listeners.lock().await;
                for listener in listeners_guard.iter() {
                    let _ = listener.try_send(new_mode);
                }
            });
        }
    }
}

impl Default for WindowModeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_normal() {
        let manager = WindowModeManager::new();
        assert_eq!(manager.current(), WindowMode::Normal);
        assert!(!manager.current().is_pinned());
    }

    #[test]
    fn test_pin_unpin_cycle() {
        let manager = WindowModeManager::new();

        assert!(manager.transition(WindowMode::Pinned).is_ok());
        assert!(manager.current().is_pinned());

        assert!(manager.transition(WindowMode::Normal).is_ok());
        assert!(!manager.current().is_pinned());
    }

    #[test]
    fn test_self_transition_rejected() {
        let manager = WindowModeManager::new();

        let result = manager.transition(WindowMode::Normal);
        assert!(matches!(
            result,
            Err(WindowError::InvalidModeTransition { .. })
        ));
        assert_eq!(manager.current(), WindowMode::Normal);

        manager.transition(WindowMode::Pinned).unwrap();
        assert!(manager.transition(WindowMode::Pinned).is_err());
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&WindowMode::Pinned).unwrap(),
            "\"pinned\""
        );
        assert_eq!(
            serde_json::to_string(&WindowMode::Normal).unwrap(),
            "\"normal\""
        );
    }

    #[tokio::test]
    async fn test_listener_receives_mode_change() {
        let manager = WindowModeManager::new();
        let mut rx = manager.subscribe().await;

        manager.transition(WindowMode::Pinned).unwrap();

        let received = tokio::time::timeout(tokio::time::Duration::from_millis(100), rx.recv())
            .await
            .expect("listener should be notified");
        assert_eq!(received, Some(WindowMode::Pinned));
    }

    #[tokio::test]
    async fn test_listener_cleanup() {
        let manager = WindowModeManager::new();

        let rx1 = manager.subscribe().await;
        let _rx2 = manager.subscribe().await;
        assert_eq!(manager.listener_count().await, 2);

        drop(rx1);
        manager.cleanup_listeners().await;
        assert_eq!(manager.listener_count().await, 1);
    }
}
