// ==========================================
// 陶器製造原価見積システム - API層エラー型
// ==========================================
// ツール: thiserror 派生マクロ
// 方針: 計算エラーはメッセージをそのまま透過する
// ==========================================

use crate::engine::CalcError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API層のエラー型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 入力エラー =====
    #[error(transparent)]
    CalcError(#[from] CalcError),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    // ===== リソースエラー =====
    #[error("対象が見つかりません: {0}")]
    NotFound(String),

    // ===== 基盤エラー =====
    #[error("データベースエラー: {0}")]
    DatabaseError(String),

    #[error("内部エラー: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// リポジトリ層エラーからの変換
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} (id={id})"))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 型エイリアス
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_message_passthrough() {
        let calc = CalcError::NonPositiveDivisor {
            field: "kiln_count",
            label: "窯入数",
        };
        let api: ApiError = calc.into();
        assert_eq!(api.to_string(), "窯入数が0以下です。");
    }

    #[test]
    fn test_not_found_conversion() {
        let repo = RepositoryError::NotFound {
            entity: "Estimate".to_string(),
            id: "7".to_string(),
        };
        let api: ApiError = repo.into();
        assert!(matches!(api, ApiError::NotFound(_)));
    }
}
