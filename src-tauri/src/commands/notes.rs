//! 便签相关的 Tauri 命令

use std::sync::Arc;

use tauri::{command, AppHandle, Manager};

use super::language::active_language;
use crate::notes::{NoteError, NoteStore};
use crate::utils::{AppError, ErrorContext};

/// 读取便签内容
#[command]
pub fn load_note(app: AppHandle) -> Result<String, ErrorContext> {
    let language = active_language(&app);

    let store = app
        .try_state::<Arc<NoteStore>>()
        .ok_or_else(|| AppError::from(NoteError::NotInitialized).context(language))?;

    store.load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load note");
        AppError::from(e).context(language)
    })
}

/// 保存便签内容
#[command]
pub fn save_note(app: AppHandle, content: String) -> Result<(), ErrorContext> {
    let language = active_language(&app);

    let store = app
        .try_state::<Arc<NoteStore>>()
        .ok_or_else(|| AppError::from(NoteError::NotInitialized).context(language))?;

    store.save(&content).map_err(|e| {
        tracing::error!(error = %e, "Failed to save note");
        AppError::from(e).context(language)
    })
}
