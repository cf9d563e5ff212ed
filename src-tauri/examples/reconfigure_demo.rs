//! 快捷键重配置协议演示
//!
//! 用内存假注册表演示提交、冲突回滚与恢复失败上报
//!
//! 运行: cargo run --example reconfigure_demo

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use notelock_lib::shortcuts::{HotkeyHandler, HotkeyRegistry, ShortcutManager, ShortcutPair};

/// 内存假注册表：`taken` 模拟其他进程占用的加速键
#[derive(Default)]
struct DemoRegistry {
    registered: HashMap<String, HotkeyHandler>,
    taken: HashSet<String>,
}

impl HotkeyRegistry for DemoRegistry {
    fn register(&mut self, accelerator: &str, handler: HotkeyHandler) -> bool {
        if self.taken.contains(accelerator) || self.registered.contains_key(accelerator) {
            return false;
        }
        self.registered.insert(accelerator.to_string(), handler);
        true
    }

    fn unregister(&mut self, accelerator: &str) {
        self.registered.remove(accelerator);
    }

    fn is_registered(&self, accelerator: &str) -> bool {
        self.registered.contains_key(accelerator)
    }
}

fn main() -> anyhow::Result<()> {
    println!("=== 快捷键重配置协议演示 ===\n");

    let handler = |name: &'static str| -> HotkeyHandler {
        Arc::new(move || println!("  [callback] {} fired", name))
    };

    let mut manager = ShortcutManager::new(
        DemoRegistry::default(),
        handler("lock"),
        handler("unlock"),
    );

    // 1. 启动：注册默认快捷键对
    println!("1. 启动注册默认对");
    println!("{}", "-".repeat(40));
    let result = manager.reconfigure(ShortcutPair::defaults());
    println!("  ok = {}, current = {:?}", result.ok, manager.current());
    println!();

    // 2. 正常重绑定
    println!("2. 重绑定到新对");
    println!("{}", "-".repeat(40));
    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+L", "Ctrl+Shift+M"));
    println!("  ok = {}, current = {:?}", result.ok, manager.current());
    println!();

    // 3. 校验拒绝：lock == unlock
    println!("3. 重复值被拒绝");
    println!("{}", "-".repeat(40));
    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+X", "Ctrl+Shift+X"));
    println!(
        "  ok = {}, errors = {:?}, current = {:?}",
        result.ok,
        result.errors,
        manager.current()
    );
    println!();

    // 4. 冲突回滚：目标 lock 被"其他进程"占用
    println!("4. 冲突触发回滚");
    println!("{}", "-".repeat(40));
    let mut manager = ShortcutManager::new(
        DemoRegistry {
            taken: HashSet::from(["Ctrl+Shift+T".to_string()]),
            ..DemoRegistry::default()
        },
        handler("lock"),
        handler("unlock"),
    );
    manager.reconfigure(ShortcutPair::defaults());
    let result = manager.reconfigure(ShortcutPair::new("Ctrl+Shift+T", "Ctrl+Shift+M"));
    println!(
        "  ok = {}, rolled_back = {}, restored = {:?}",
        result.ok, result.rolled_back, result.restored
    );
    println!("  current = {:?} (旧对恢复)", manager.current());
    println!();

    println!("演示结束");
    Ok(())
}
