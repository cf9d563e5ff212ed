/// Tauri command surface
pub mod commands;

/// Localization
pub mod i18n;

/// Note persistence
pub mod notes;

/// Global shortcut management
pub mod shortcuts;

/// Configuration state
pub mod state;

/// System tray
pub mod tray;

/// Utility modules
pub mod utils;

/// Window control and pinned mode
pub mod window;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    utils::logging::init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            let handle = app.handle();

            let config = state::init_config(handle)?;
            window::setup_window_mode(handle);
            notes::setup_note_store(handle)?;

            // 托盘不可用不是致命错误，窗口与快捷键照常工作
            if let Err(e) = tray::setup_tray(handle, config.language()) {
                tracing::warn!(error = %e, "Tray unavailable, continuing without it");
            }

            window::restore_window_bounds(handle, &config.get().window);
            shortcuts::setup_shortcuts(handle, &config.shortcuts());

            Ok(())
        })
        .on_window_event(|window, event| match event {
            tauri::WindowEvent::CloseRequested { api, .. } => {
                // 托盘应用：关闭按钮只隐藏窗口，退出走托盘菜单或 close_window 命令
                api.prevent_close();
                let _ = window.hide();
            }
            tauri::WindowEvent::Moved(_) | tauri::WindowEvent::Resized(_) => {
                window::persist_window_bounds(window);
            }
            _ => {}
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_shortcuts,
            commands::get_default_shortcuts,
            commands::set_shortcuts,
            commands::reset_shortcuts,
            commands::get_language,
            commands::set_language,
            commands::load_note,
            commands::save_note,
            commands::toggle_pin,
            commands::minimize_window,
            commands::close_window,
            commands::open_external,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| {
            if let tauri::RunEvent::Exit = event {
                shortcuts::teardown_shortcuts(app);
            }
        });
}
