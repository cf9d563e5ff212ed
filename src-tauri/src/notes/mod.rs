//! 便签模块
//!
//! 单条便签的 SQLite 持久化与自动备份

mod error;
mod store;

pub use error::{NoteError, NoteResult};
pub use store::{note_backup_path, note_db_path, setup_note_store, NoteStore};
