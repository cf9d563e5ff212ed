//! 系统托盘模块
//!
//! 提供系统托盘图标和菜单功能
//!
//! # 功能
//!
//! - 托盘图标显示
//! - 右键菜单（打开、隐藏、退出），文案本地化
//! - 左键点击切换主窗口显示/隐藏
//! - 语言切换后重建菜单

use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager, Runtime, Wry,
};
use thiserror::Error;

use crate::i18n::{self, Language};
use crate::window::MAIN_WINDOW;

/// 托盘错误类型
#[derive(Error, Debug)]
pub enum TrayError {
    /// Tauri 错误
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    /// 菜单创建失败
    #[error("Failed to create menu: {0}")]
    MenuCreation(String),

    /// 托盘图标创建失败
    #[error("Failed to create tray icon: {0}")]
    TrayCreation(String),

    /// 托盘图标未找到
    #[error("Tray icon not found: {0}")]
    TrayNotFound(String),
}

/// 托盘结果类型
pub type TrayResult<T> = Result<T, TrayError>;

/// 托盘图标 ID（语言切换时用它找回图标）
pub const TRAY_ID: &str = "notelock-tray";

/// 托盘菜单项 ID
pub mod menu_ids {
    pub const OPEN: &str = "open";
    pub const HIDE: &str = "hide";
    pub const QUIT: &str = "quit";
}

/// 设置系统托盘
///
/// 创建托盘图标和本地化菜单，注册事件处理器
pub fn setup_tray(app: &AppHandle<Wry>, language: Language) -> TrayResult<()> {
    tracing::info!("Setting up system tray");

    let menu = build_menu(app, language)?;

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(tray_icon(app))
        .menu(&menu)
        .show_menu_on_left_click(false)
        .tooltip(i18n::translate(language, "tray_tooltip", "Notelock"))
        .on_menu_event(move |app, event| {
            handle_menu_event(app, event.id.as_ref());
        })
        .on_tray_icon_event(|tray, event| {
            handle_tray_event(tray.app_handle(), event);
        })
        .build(app)
        .map_err(|e| TrayError::TrayCreation(e.to_string()))?;

    tracing::info!("System tray setup complete");
    Ok(())
}

/// 语言切换后重建托盘菜单与提示文本
pub fn update_tray_menu(app: &AppHandle<Wry>, language: Language) -> TrayResult<()> {
    let tray = app
        .tray_by_id(TRAY_ID)
        .ok_or_else(|| TrayError::TrayNotFound(TRAY_ID.to_string()))?;

    let menu = build_menu(app, language)?;
    tray.set_menu(Some(menu))?;
    tray.set_tooltip(Some(i18n::translate(language, "tray_tooltip", "Notelock")))?;

    tracing::debug!(language = language.code(), "Tray menu rebuilt");
    Ok(())
}

/// 构建本地化的托盘菜单
fn build_menu(app: &AppHandle<Wry>, language: Language) -> TrayResult<Menu<Wry>> {
    let open = MenuItem::with_id(
        app,
        menu_ids::OPEN,
        i18n::translate(language, "tray_open", "Open Notelock"),
        true,
        None::<&str>,
    )
    .map_err(|e| TrayError::MenuCreation(e.to_string()))?;

    let hide = MenuItem::with_id(
        app,
        menu_ids::HIDE,
        i18n::translate(language, "tray_hide", "Hide"),
        true,
        None::<&str>,
    )
    .map_err(|e| TrayError::MenuCreation(e.to_string()))?;

    let separator =
        PredefinedMenuItem::separator(app).map_err(|e| TrayError::MenuCreation(e.to_string()))?;

    let quit = MenuItem::with_id(
        app,
        menu_ids::QUIT,
        i18n::translate(language, "tray_quit", "Quit"),
        true,
        None::<&str>,
    )
    .map_err(|e| TrayError::MenuCreation(e.to_string()))?;

    Menu::with_items(app, &[&open, &hide, &separator, &quit])
        .map_err(|e| TrayError::MenuCreation(e.to_string()))
}

/// 处理菜单事件
fn handle_menu_event<R: Runtime>(app: &AppHandle<R>, menu_id: &str) {
    tracing::debug!(menu_id = %menu_id, "Tray menu event");

    match menu_id {
        menu_ids::OPEN => {
            show_main_window(app);
        }
        menu_ids::HIDE => {
            hide_main_window(app);
        }
        menu_ids::QUIT => {
            tracing::info!("User requested quit from tray menu");
            app.exit(0);
        }
        _ => {
            tracing::warn!(menu_id = %menu_id, "Unknown menu event");
        }
    }
}

/// 处理托盘图标事件
///
/// 左键单击切换主窗口显示/隐藏
fn handle_tray_event<R: Runtime>(app: &AppHandle<R>, event: TrayIconEvent) {
    if let TrayIconEvent::Click {
        button: MouseButton::Left,
        button_state: MouseButtonState::Up,
        ..
    } = event
    {
        tracing::debug!("Tray left click");
        toggle_main_window(app);
    }
}

/// 显示主窗口
pub fn show_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        let _ = window.show();
        let _ = window.set_focus();
    } else {
        tracing::warn!("Main window not found");
    }
}

/// 隐藏主窗口
pub fn hide_main_window<R: Runtime>(app: &AppHandle<R>) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        let _ = window.hide();
    }
}

/// 切换主窗口显示/隐藏
fn toggle_main_window<R: Runtime>(app: &AppHandle<R>) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        tracing::warn!("Main window not found");
        return;
    };

    if window.is_visible().unwrap_or(false) {
        let _ = window.hide();
    } else {
        let _ = window.show();
        let _ = window.set_focus();
    }
}

/// 托盘图标
///
/// 优先使用应用默认窗口图标，没有时生成一个便签黄色的方块。
fn tray_icon(app: &AppHandle<Wry>) -> Image<'static> {
    if let Some(icon) = app.default_window_icon() {
        let rgba = icon.rgba().to_vec();
        return Image::new_owned(rgba, icon.width(), icon.height());
    }

    const SIZE: u32 = 32;
    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for _ in 0..SIZE * SIZE {
        rgba.extend_from_slice(&[0xFF, 0xE0, 0x66, 0xFF]);
    }
    Image::new_owned(rgba, SIZE, SIZE)
}
