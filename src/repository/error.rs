// ==========================================
// 陶器製造原価見積システム - リポジトリ層エラー型
// ==========================================
// ツール: thiserror 派生マクロ
// ==========================================

use thiserror::Error;

/// リポジトリ層のエラー型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== データベースエラー =====
    #[error("レコードが見つかりません: {entity} (id={id})")]
    NotFound { entity: String, id: String },

    #[error("データベースロックの取得に失敗しました: {0}")]
    LockError(String),

    #[error("データベーストランザクションに失敗しました: {0}")]
    DatabaseTransactionError(String),

    #[error("データベースクエリに失敗しました: {0}")]
    DatabaseQueryError(String),

    #[error("一意制約違反: {0}")]
    UniqueConstraintViolation(String),

    // ===== データ品質エラー =====
    #[error("保存データの検証に失敗しました: {0}")]
    ValidationError(String),

    // ===== 汎用エラー =====
    #[error("内部エラー: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// rusqlite::Error からの変換
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 型エイリアス
pub type RepositoryResult<T> = Result<T, RepositoryError>;
