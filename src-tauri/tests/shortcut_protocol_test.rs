//! 快捷键重配置协议集成测试
//!
//! 用确定性的假注册表驱动管理器，覆盖提交、校验拒绝、冲突回滚、
//! 恢复失败上报与持久化顺序等核心性质。

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use notelock_lib::shortcuts::{
    HotkeyHandler, HotkeyRegistry, ShortcutErrorKind, ShortcutManager, ShortcutPair,
};

// ============================================================================
// 假注册表
// ============================================================================

#[derive(Default)]
struct RegistryState {
    /// 本进程持有的注册（加速键 → 回调）
    registered: HashMap<String, HotkeyHandler>,
    /// 模拟的"其他进程"持有的加速键，注册这些键一律失败
    taken_by_other_process: HashSet<String>,
    register_calls: usize,
    unregister_calls: usize,
}

/// 可克隆的假注册表：测试保留一个句柄，在调用之间制造冲突与抢占
#[derive(Clone, Default)]
struct FakeRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl FakeRegistry {
    fn new() -> Self {
        Self::default()
    }

    /// 模拟其他进程占用一个加速键
    ///
    /// 同时移除我们自己的注册：被抢占的键不再属于本进程。
    fn seize(&self, accelerator: &str) {
        let mut state = self.state.lock().unwrap();
        state.registered.remove(accelerator);
        state
            .taken_by_other_process
            .insert(accelerator.to_string());
    }

    /// 触发一个已注册加速键的回调
    fn trigger(&self, accelerator: &str) {
        let handler = {
            let state = self.state.lock().unwrap();
            state.registered.get(accelerator).cloned()
        };
        if let Some(handler) = handler {
            handler();
        }
    }

    /// 本进程当前持有的注册（排序后）
    fn registered_accelerators(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut keys: Vec<String> = state.registered.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// (register, unregister) 调用计数
    fn call_counts(&self) -> (usize, usize) {
        let state = self.state.lock().unwrap();
        (state.register_calls, state.unregister_calls)
    }
}

impl HotkeyRegistry for FakeRegistry {
    fn register(&mut self, accelerator: &str, handler: HotkeyHandler) -> bool {
        let mut state = self.state.lock().unwrap();
        state.register_calls += 1;

        // 注册是进程间排他的
        if state.taken_by_other_process.contains(accelerator)
            || state.registered.contains_key(accelerator)
        {
            return false;
        }

        state.registered.insert(accelerator.to_string(), handler);
        true
    }

    fn unregister(&mut self, accelerator: &str) {
        let mut state = self.state.lock().unwrap();
        state.unregister_calls += 1;
        state.registered.remove(accelerator);
    }

    fn is_registered(&self, accelerator: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.registered.contains_key(accelerator)
    }
}

// ============================================================================
// 测试脚手架
// ============================================================================

/// 记录回调触发顺序的标记
type FiredLog = Arc<Mutex<Vec<&'static str>>>;

fn recording_handler(log: &FiredLog, marker: &'static str) -> HotkeyHandler {
    let log = Arc::clone(log);
    Arc::new(move || log.lock().unwrap().push(marker))
}

fn manager_with_registry() -> (ShortcutManager<FakeRegistry>, FakeRegistry, FiredLog) {
    let registry = FakeRegistry::new();
    let log: FiredLog = Arc::new(Mutex::new(Vec::new()));
    let manager = ShortcutManager::new(
        registry.clone(),
        recording_handler(&log, "lock"),
        recording_handler(&log, "unlock"),
    );
    (manager, registry, log)
}

// ============================================================================
// 提交路径
// ============================================================================

#[test]
fn test_valid_candidate_commits() {
    let (mut manager, registry, _log) = manager_with_registry();

    let result = manager.reconfigure(ShortcutPair::defaults());

    assert!(result.ok);
    assert!(result.registered.lock);
    assert!(result.registered.unlock);
    assert!(!result.rolled_back);
    assert!(result.errors.is_empty());
    assert_eq!(manager.current(), ShortcutPair::defaults());
    assert_eq!(
        registry.registered_accelerators(),
        vec!["Ctrl+Shift+P".to_string(), "Ctrl+Shift+U".to_string()]
    );
}

#[test]
fn test_commit_replaces_previous_registrations() {
    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    let next = ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M");
    let result = manager.reconfigure(next.clone());

    assert!(result.ok);
    assert_eq!(manager.current(), next);
    // 注册表中属于本应用的集合 == 最后一次成功提交的对
    assert_eq!(
        registry.registered_accelerators(),
        vec!["Ctrl+Shift+L".to_string(), "Ctrl+Shift+M".to_string()]
    );
}

#[test]
fn test_swap_reuses_old_lock_value_as_new_unlock() {
    let (mut manager, registry, log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    // 新的 unlock 复用旧的 lock 值
    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+P"));

    assert!(result.ok);
    assert_eq!(
        manager.current(),
        ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+P")
    );

    // 旧的 "Ctrl+Shift+P" 现在绑定的是解锁回调，不是锁定回调
    registry.trigger("Ctrl+Shift+P");
    registry.trigger("Ctrl+Shift+L");
    assert_eq!(*log.lock().unwrap(), vec!["unlock", "lock"]);
}

// ============================================================================
// 校验拒绝（注册表不被触碰）
// ============================================================================

#[test]
fn test_empty_lock_rejected_previous_pair_stays_live() {
    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());
    let calls_before = registry.call_counts();

    let result = manager.reconfigure(ShortcutPair::new("", "Ctrl+Shift+U"));

    assert!(!result.ok);
    assert_eq!(result.errors.lock, Some(ShortcutErrorKind::Empty));
    assert!(result.errors.unlock.is_none());
    assert!(!result.rolled_back);
    assert_eq!(manager.current(), ShortcutPair::defaults());
    // 校验先行：没有任何注册表调用
    assert_eq!(registry.call_counts(), calls_before);
    assert!(registry.is_registered("Ctrl+Shift+P"));
    assert!(registry.is_registered("Ctrl+Shift+U"));
}

#[test]
fn test_both_fields_empty_rejected() {
    let (mut manager, _registry, _log) = manager_with_registry();

    let result = manager.reconfigure(ShortcutPair::unset());

    assert!(!result.ok);
    assert_eq!(result.errors.lock, Some(ShortcutErrorKind::Empty));
    assert_eq!(result.errors.unlock, Some(ShortcutErrorKind::Empty));
}

#[test]
fn test_duplicate_values_rejected_on_both_fields() {
    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());
    let calls_before = registry.call_counts();

    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+X", "Ctrl+Shift+X"));

    assert!(!result.ok);
    assert_eq!(result.errors.lock, Some(ShortcutErrorKind::SameAsOther));
    assert_eq!(result.errors.unlock, Some(ShortcutErrorKind::SameAsOther));
    assert_eq!(registry.call_counts(), calls_before);
    assert_eq!(manager.current(), ShortcutPair::defaults());
}

// ============================================================================
// 冲突回滚
// ============================================================================

#[test]
fn test_conflict_rolls_back_and_restores_previous_pair() {
    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    // 目标 lock 已被其他进程占用
    registry.seize("Ctrl+Shift+L");

    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M"));

    assert!(!result.ok);
    assert!(!result.registered.lock);
    assert_eq!(result.errors.lock, Some(ShortcutErrorKind::RegisterFailed));
    // unlock 的注册仍被尝试，调用方拿到完整诊断
    assert!(result.registered.unlock);
    assert!(result.errors.unlock.is_none());
    assert!(result.rolled_back);
    assert!(result.restored.lock);
    assert!(result.restored.unlock);
    assert!(!result.restore_failed());

    // 旧对恢复注册，部分成功的新注册被撤销
    assert_eq!(manager.current(), ShortcutPair::defaults());
    assert_eq!(
        registry.registered_accelerators(),
        vec!["Ctrl+Shift+P".to_string(), "Ctrl+Shift+U".to_string()]
    );
}

#[test]
fn test_rollback_restores_handler_wiring() {
    let (mut manager, registry, log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    registry.seize("Ctrl+Shift+L");
    manager.reconfigure(ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M"));

    // 恢复后的注册仍然指向原来的回调
    registry.trigger("Ctrl+Shift+P");
    registry.trigger("Ctrl+Shift+U");
    assert_eq!(*log.lock().unwrap(), vec!["lock", "unlock"]);
}

#[test]
fn test_restore_failure_is_reported() {
    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    // 操作窗口内旧的 lock 被其他进程抢走，同时新的 lock 也被占用
    registry.seize("Ctrl+Shift+P");
    registry.seize("Ctrl+Shift+X");

    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+X", "Ctrl+Shift+U"));

    assert!(!result.ok);
    assert!(result.rolled_back);
    // 恢复旧 lock 失败并被显式上报，此刻锁定快捷键不可用
    assert!(!result.restored.lock);
    assert_eq!(
        result.restore_errors.lock,
        Some(ShortcutErrorKind::RestoreFailed)
    );
    assert!(result.restored.unlock);
    assert!(result.restore_failed());

    // 管理器的认知仍然回到旧对（状态描述意图）
    assert_eq!(manager.current(), ShortcutPair::defaults());
    assert!(!registry.is_registered("Ctrl+Shift+P"));
    assert!(registry.is_registered("Ctrl+Shift+U"));
}

#[test]
fn test_startup_failure_from_unset_leaves_nothing_registered() {
    let (mut manager, registry, _log) = manager_with_registry();

    // 启动时默认 lock 已被其他应用占用
    registry.seize("Ctrl+Shift+P");

    let result = manager.reconfigure(ShortcutPair::defaults());

    assert!(!result.ok);
    assert!(result.rolled_back);
    // 旧对为空：没有什么可恢复，恢复视为成功
    assert!(result.restored.lock);
    assert!(result.restored.unlock);
    assert!(!result.restore_failed());
    assert!(manager.current().is_unset());
    assert!(registry.registered_accelerators().is_empty());
}

// ============================================================================
// 重置与注销
// ============================================================================

#[test]
fn test_reset_to_defaults_twice_is_idempotent() {
    let (mut manager, _registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M"));

    let first = manager.reset_to_defaults();
    assert!(first.ok);
    assert_eq!(manager.current(), manager.defaults());

    let second = manager.reset_to_defaults();
    assert!(second.ok);
    assert_eq!(manager.current(), manager.defaults());
}

#[test]
fn test_teardown_unregisters_live_pair() {
    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    manager.teardown();

    assert!(manager.current().is_unset());
    assert!(registry.registered_accelerators().is_empty());
}

// ============================================================================
// 持久化顺序（调用方纪律）
// ============================================================================

#[test]
fn test_failed_reconfigure_leaves_persisted_config_untouched() {
    use notelock_lib::state::{AppConfig, ConfigManager};

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");

    // 持久化初始快捷键对
    let mut config = AppConfig::default();
    config.shortcuts = ShortcutPair::defaults();
    ConfigManager::save_to(&config_path, &config).unwrap();
    let bytes_before = std::fs::read(&config_path).unwrap();

    let (mut manager, registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());
    registry.seize("Ctrl+Shift+L");

    // 命令层纪律：只有 ok 才写盘
    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M"));
    if result.ok {
        config.shortcuts = manager.current();
        ConfigManager::save_to(&config_path, &config).unwrap();
    }

    // 失败的尝试之后，持久化文件逐字节不变
    assert!(!result.ok);
    let bytes_after = std::fs::read(&config_path).unwrap();
    assert_eq!(bytes_before, bytes_after);
}

#[test]
fn test_successful_reconfigure_persists_committed_pair() {
    use notelock_lib::state::{AppConfig, ConfigManager};

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");

    let mut config = AppConfig::default();
    ConfigManager::save_to(&config_path, &config).unwrap();

    let (mut manager, _registry, _log) = manager_with_registry();
    manager.reconfigure(ShortcutPair::defaults());

    let next = ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M");
    let result = manager.reconfigure(next.clone());
    if result.ok {
        config.shortcuts = manager.current();
        ConfigManager::save_to(&config_path, &config).unwrap();
    }

    assert!(result.ok);
    let reloaded = ConfigManager::load_from(&config_path).unwrap();
    assert_eq!(reloaded.shortcuts, next);
}

// ============================================================================
// 需要 Tauri 环境的测试（标记为 ignore）
// ============================================================================

#[test]
#[ignore = "Requires Tauri application environment"]
fn test_global_shortcut_registry_against_real_plugin() {
    // 生产注册表实现需要完整的 Tauri 应用与系统热键表
}
