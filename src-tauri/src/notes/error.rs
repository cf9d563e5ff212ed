//! 便签存储错误类型

use thiserror::Error;

/// 便签存储相关错误
#[derive(Error, Debug)]
pub enum NoteError {
    /// IO 错误（备份复制、目录创建）
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite 错误
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// 存储尚未初始化
    #[error("Note store is not initialized")]
    NotInitialized,
}

/// 便签模块的结果类型
pub type NoteResult<T> = Result<T, NoteError>;
