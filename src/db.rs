// ==========================================
// 陶器製造原価見積システム - SQLite 接続初期化
// ==========================================
// 目的:
// - すべての Connection::open の PRAGMA 挙動を統一する
// - busy_timeout を統一し、並行書き込み時の busy エラーを減らす
// - estimates テーブルのスキーマ作成を一箇所に集約する
// ==========================================

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// デフォルト busy_timeout（ミリ秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// SQLite 接続に統一 PRAGMA を適用する
///
/// 補足:
/// - foreign_keys は「接続ごと」に有効化が必要
/// - busy_timeout も「接続ごと」に設定が必要
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 接続を開き、統一設定を適用する
pub fn open_sqlite_connection<P: AsRef<Path>>(db_path: P) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// メモリ上の SQLite 接続を開く（テスト・プレビュー用）
pub fn open_in_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 見積履歴テーブルを作成する（存在しなければ）
///
/// estimate_data には CostBreakdown を JSON 文字列として不透明に格納する。
/// status は active / sent / deleted の3状態。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS estimates (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL,
            estimate_data TEXT    NOT NULL,
            status        TEXT    NOT NULL DEFAULT 'active'
                          CHECK (status IN ('active', 'sent', 'deleted')),
            created_at    TEXT    NOT NULL,
            sent_at       TEXT,
            deleted_at    TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_estimates_user_status
            ON estimates (user_id, status);
        "#,
    )?;
    Ok(())
}
