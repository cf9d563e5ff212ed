//! 快捷键管理器
//!
//! 持有当前生效的快捷键对，对系统热键表执行事务式的重配置：
//! 要么两个新加速键全部注册成功并提交，要么回滚恢复旧快捷键对。
//!
//! # 不变量
//!
//! - 注册表中属于本应用的加速键集合始终等于最后一次成功提交的快捷键对
//!   （重配置进行中的短暂窗口除外）
//! - 已提交的对中 `lock` 与 `unlock` 永不相同、永不为空
//! - 管理器从不跨公共边界抛出错误，所有结果都是结构化返回值

use serde::Serialize;

use super::error::ShortcutErrorKind;
use super::pair::ShortcutPair;
use super::registry::{HotkeyHandler, HotkeyRegistry};

/// 按字段的布尔标记（lock / unlock）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldFlags {
    pub lock: bool,
    pub unlock: bool,
}

/// 按字段的错误分类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<ShortcutErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock: Option<ShortcutErrorKind>,
}

impl FieldErrors {
    /// 是否没有任何字段错误
    pub fn is_empty(&self) -> bool {
        self.lock.is_none() && self.unlock.is_none()
    }
}

/// 重配置操作的结构化结果
///
/// 携带调用方做出决策所需的全部诊断信息：整体成败、每个字段的
/// 注册结果与错误分类、是否发生回滚、回滚时旧快捷键的恢复情况。
/// `restore_errors` 中出现 [`ShortcutErrorKind::RestoreFailed`] 表示
/// 当前没有任何快捷键生效，调用方必须显著地警告用户。
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconfigureResult {
    /// 整体是否成功提交
    pub ok: bool,

    /// 每个候选加速键是否注册成功
    pub registered: FieldFlags,

    /// 每个字段的失败原因
    pub errors: FieldErrors,

    /// 是否执行了回滚
    pub rolled_back: bool,

    /// 回滚时旧快捷键是否恢复成功（旧值为空视为恢复成功）
    pub restored: FieldFlags,

    /// 回滚恢复阶段的失败原因
    pub restore_errors: FieldErrors,
}

impl ReconfigureResult {
    fn success() -> Self {
        Self {
            ok: true,
            registered: FieldFlags {
                lock: true,
                unlock: true,
            },
            ..Self::default()
        }
    }

    /// 回滚恢复是否失败（意味着当前没有生效的快捷键）
    pub fn restore_failed(&self) -> bool {
        !self.restore_errors.is_empty()
    }
}

/// 快捷键管理器
///
/// 独占地拥有"当前生效的快捷键对"这一概念。注册表与处理器在
/// 构造时注入；多线程宿主上整个实例置于互斥锁之后，
/// 保证 注销→注册→回滚 序列不被并发的第二次调用撕裂。
pub struct ShortcutManager<R: HotkeyRegistry> {
    registry: R,
    current: ShortcutPair,
    lock_handler: HotkeyHandler,
    unlock_handler: HotkeyHandler,
}

impl<R: HotkeyRegistry> ShortcutManager<R> {
    /// 创建新的管理器
    ///
    /// 初始状态为"未设置"：尚无任何加速键注册。
    /// 启动流程随后用持久化的（或默认的）快捷键对调用 [`reconfigure`]。
    ///
    /// [`reconfigure`]: ShortcutManager::reconfigure
    pub fn new(registry: R, lock_handler: HotkeyHandler, unlock_handler: HotkeyHandler) -> Self {
        Self {
            registry,
            current: ShortcutPair::unset(),
            lock_handler,
            unlock_handler,
        }
    }

    /// 最后一次成功提交的快捷键对
    pub fn current(&self) -> ShortcutPair {
        self.current.clone()
    }

    /// 固定的默认快捷键对
    pub fn defaults(&self) -> ShortcutPair {
        ShortcutPair::defaults()
    }

    /// 用候选快捷键对替换当前生效的对
    ///
    /// 从调用方视角是原子的：两个新加速键要么全部生效，
    /// 要么一个都不生效且旧快捷键对被恢复。
    ///
    /// 校验先于任何注册表操作：形状非法（空字段或 lock == unlock）
    /// 的候选在触碰注册表之前就被拒绝，旧快捷键保持注册状态。
    ///
    /// 持久化是调用方的责任，且只应在返回结果 `ok` 时进行。
    pub fn reconfigure(&mut self, candidate: ShortcutPair) -> ReconfigureResult {
        let candidate = candidate.normalized();
        let prev = self.current.clone();

        // 纯本地校验，失败时注册表不发生任何变化
        if let Some(result) = Self::validate(&candidate) {
            tracing::warn!(
                lock = %candidate.lock,
                unlock = %candidate.unlock,
                "Rejected shortcut pair before touching the registry"
            );
            return result;
        }

        // 先注销旧对，避免 lock/unlock 互换时自我冲突；
        // 注销失败被吞掉，加速键可能本来就不存在
        if !prev.lock.is_empty() {
            self.registry.unregister(&prev.lock);
        }
        if !prev.unlock.is_empty() {
            self.registry.unregister(&prev.unlock);
        }

        // 两个注册各自独立尝试，一个失败不会跳过另一个，
        // 调用方因此能拿到完整的按字段诊断
        let lock_ok = self
            .registry
            .register(&candidate.lock, self.lock_handler.clone());
        let unlock_ok = self
            .registry
            .register(&candidate.unlock, self.unlock_handler.clone());

        if lock_ok && unlock_ok {
            tracing::info!(
                lock = %candidate.lock,
                unlock = %candidate.unlock,
                "Shortcut pair committed"
            );
            self.current = candidate;
            return ReconfigureResult::success();
        }

        // 部分失败：撤销已成功的新注册，恢复旧对
        let mut result = ReconfigureResult {
            registered: FieldFlags {
                lock: lock_ok,
                unlock: unlock_ok,
            },
            ..ReconfigureResult::default()
        };
        if !lock_ok {
            result.errors.lock = Some(ShortcutErrorKind::RegisterFailed);
        }
        if !unlock_ok {
            result.errors.unlock = Some(ShortcutErrorKind::RegisterFailed);
        }

        self.rollback(&candidate, &prev, lock_ok, unlock_ok, &mut result);
        result
    }

    /// 恢复默认快捷键对，等价于 `reconfigure(defaults)`
    pub fn reset_to_defaults(&mut self) -> ReconfigureResult {
        self.reconfigure(ShortcutPair::defaults())
    }

    /// 进程退出时注销当前生效的快捷键对
    pub fn teardown(&mut self) {
        if !self.current.lock.is_empty() {
            self.registry.unregister(&self.current.lock);
        }
        if !self.current.unlock.is_empty() {
            self.registry.unregister(&self.current.unlock);
        }
        self.current = ShortcutPair::unset();
        tracing::info!("Shortcut pair unregistered on teardown");
    }

    /// 测试与诊断用：访问注册表
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// 形状校验：空字段与重复值
    fn validate(candidate: &ShortcutPair) -> Option<ReconfigureResult> {
        let mut errors = FieldErrors::default();

        if candidate.lock.is_empty() {
            errors.lock = Some(ShortcutErrorKind::Empty);
        }
        if candidate.unlock.is_empty() {
            errors.unlock = Some(ShortcutErrorKind::Empty);
        }
        if errors.is_empty() && candidate.lock == candidate.unlock {
            errors.lock = Some(ShortcutErrorKind::SameAsOther);
            errors.unlock = Some(ShortcutErrorKind::SameAsOther);
        }

        if errors.is_empty() {
            None
        } else {
            Some(ReconfigureResult {
                errors,
                ..ReconfigureResult::default()
            })
        }
    }

    /// 回滚：撤销部分注册，重新注册旧对
    ///
    /// `current` 无论恢复注册是否成功都回到 `prev`：管理器对
    /// 生效状态的认知始终跟随意图；恢复失败通过
    /// `restore_errors` 上报，由调用方警告用户当前没有快捷键生效。
    fn rollback(
        &mut self,
        candidate: &ShortcutPair,
        prev: &ShortcutPair,
        lock_ok: bool,
        unlock_ok: bool,
        result: &mut ReconfigureResult,
    ) {
        result.rolled_back = true;

        if lock_ok {
            self.registry.unregister(&candidate.lock);
        }
        if unlock_ok {
            self.registry.unregister(&candidate.unlock);
        }

        if prev.lock.is_empty() {
            result.restored.lock = true;
        } else {
            result.restored.lock = self
                .registry
                .register(&prev.lock, self.lock_handler.clone());
            if !result.restored.lock {
                result.restore_errors.lock = Some(ShortcutErrorKind::RestoreFailed);
                tracing::error!(
                    accelerator = %prev.lock,
                    "Failed to restore previous lock shortcut, no shortcut is active"
                );
            }
        }

        if prev.unlock.is_empty() {
            result.restored.unlock = true;
        } else {
            result.restored.unlock = self
                .registry
                .register(&prev.unlock, self.unlock_handler.clone());
            if !result.restored.unlock {
                result.restore_errors.unlock = Some(ShortcutErrorKind::RestoreFailed);
                tracing::error!(
                    accelerator = %prev.unlock,
                    "Failed to restore previous unlock shortcut, no shortcut is active"
                );
            }
        }

        self.current = prev.clone();
    }
}
