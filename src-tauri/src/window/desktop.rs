//! 桌面背景挂载
//!
//! 钉住模式下把便签窗口放到所有窗口之后。Windows 上通过把窗口
//! 重新挂到桌面壳层窗口（Progman）下实现；其他平台退化为
//! 置于窗口层级最底部。

use tauri::WebviewWindow;

use super::error::WindowResult;

/// 把窗口挂到桌面背景
#[cfg(target_os = "windows")]
pub fn attach_to_desktop(window: &WebviewWindow) -> WindowResult<()> {
    use super::error::WindowError;
    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, SetParent};

    let hwnd = HWND(window.hwnd()?.0 as _);

    // Progman 是桌面壳层窗口，挂为其子窗口即位于所有普通窗口之后
    unsafe {
        let progman = FindWindowW(w!("Progman"), PCWSTR::null())
            .map_err(|e| WindowError::Desktop(e.to_string()))?;
        SetParent(hwnd, progman).map_err(|e| WindowError::Desktop(e.to_string()))?;
    }

    tracing::debug!("Window reparented to desktop shell");
    Ok(())
}

/// 把窗口从桌面背景取回
#[cfg(target_os = "windows")]
pub fn detach_from_desktop(window: &WebviewWindow) -> WindowResult<()> {
    use super::error::WindowError;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::SetParent;

    let hwnd = HWND(window.hwnd()?.0 as _);

    // 挂回空父窗口即恢复为顶层窗口
    unsafe {
        SetParent(hwnd, HWND(std::ptr::null_mut()))
            .map_err(|e| WindowError::Desktop(e.to_string()))?;
    }

    tracing::debug!("Window detached from desktop shell");
    Ok(())
}

/// 把窗口挂到桌面背景（非 Windows：置底）
#[cfg(not(target_os = "windows"))]
pub fn attach_to_desktop(window: &WebviewWindow) -> WindowResult<()> {
    window.set_always_on_bottom(true)?;
    tracing::debug!("Window pushed to the bottom of the stacking order");
    Ok(())
}

/// 把窗口从桌面背景取回（非 Windows：取消置底）
#[cfg(not(target_os = "windows"))]
pub fn detach_from_desktop(window: &WebviewWindow) -> WindowResult<()> {
    window.set_always_on_bottom(false)?;
    tracing::debug!("Window restored to the normal stacking order");
    Ok(())
}
