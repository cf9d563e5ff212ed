//! 便签存储
//!
//! 单条自由文本记录的 SQLite 持久化。打开成功后自动复制一份
//! 备份文件；主库损坏时从备份恢复重试。

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use tauri::{AppHandle, Manager, Runtime};

use super::error::{NoteError, NoteResult};

/// 便签只有一条记录，固定主键
const NOTE_ROW_ID: i64 = 1;

/// 便签存储
///
/// 连接置于互斥锁后，命令层可以从任意线程访问。
pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    /// 打开便签数据库
    ///
    /// 主库打开（或建表）失败且存在备份时，用备份覆盖主库后重试。
    /// 打开成功后把主库复制为备份。
    pub fn open(db_path: &Path, backup_path: &Path) -> NoteResult<Self> {
        let conn = match Self::try_open(db_path) {
            Ok(conn) => conn,
            Err(e) if backup_path.exists() => {
                tracing::warn!(
                    db = %db_path.display(),
                    error = %e,
                    "Note database unusable, restoring from backup"
                );
                std::fs::copy(backup_path, db_path)?;
                Self::try_open(db_path)?
            }
            Err(e) => return Err(e),
        };

        // 打开成功后刷新备份；失败不阻塞启动
        if let Err(e) = std::fs::copy(db_path, backup_path) {
            tracing::warn!(error = %e, "Note database backup copy failed");
        }

        tracing::info!(db = %db_path.display(), "Note store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 打开连接并确保表结构存在
    ///
    /// 损坏的文件在建表语句处报错，由调用方决定是否走备份恢复。
    fn try_open(db_path: &Path) -> NoteResult<Connection> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        Ok(conn)
    }

    /// 读取便签内容，记录不存在时返回空字符串
    pub fn load(&self) -> NoteResult<String> {
        let conn = self.lock_conn();

        let content: Option<String> = conn
            .query_row(
                "SELECT content FROM notes WHERE id = ?1",
                params![NOTE_ROW_ID],
                |row| row.get(0),
            )
            .optional()?;

        Ok(content.unwrap_or_default())
    }

    /// 保存便签内容（插入或更新单条记录）
    pub fn save(&self, content: &str) -> NoteResult<()> {
        let conn = self.lock_conn();

        conn.execute(
            r#"
            INSERT INTO notes (id, content)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![NOTE_ROW_ID, content],
        )?;

        tracing::debug!(bytes = content.len(), "Note saved");
        Ok(())
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// 主库文件路径
pub fn note_db_path<R: Runtime>(app: &AppHandle<R>) -> NoteResult<PathBuf> {
    let dir = app
        .path()
        .app_data_dir()
        .map_err(|e| NoteError::Io(std::io::Error::other(e.to_string())))?;
    Ok(dir.join("notelock.db"))
}

/// 备份文件路径
pub fn note_backup_path<R: Runtime>(app: &AppHandle<R>) -> NoteResult<PathBuf> {
    let dir = app
        .path()
        .app_data_dir()
        .map_err(|e| NoteError::Io(std::io::Error::other(e.to_string())))?;
    Ok(dir.join(".backup-notelock.db"))
}

/// 初始化便签存储并装入应用状态
pub fn setup_note_store(app: &AppHandle) -> NoteResult<()> {
    let db_path = note_db_path(app)?;
    let backup_path = note_backup_path(app)?;

    let store = NoteStore::open(&db_path, &backup_path)?;
    app.manage(Arc::new(store));

    Ok(())
}
