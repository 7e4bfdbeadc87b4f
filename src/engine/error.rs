// ==========================================
// 陶器製造原価見積システム - エンジン層エラー型
// ==========================================
// 方針: 例外を制御フローに使わず、型付き Result で返す
// ツール: thiserror 派生マクロ
// ==========================================

use thiserror::Error;

/// 計算エンジンのエラー型
///
/// すべて1回の見積計算に閉じたエラーで、リトライ対象にならない。
/// メッセージはそのまま利用者に提示できる日本語文。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    // ===== 入力検証エラー（Normalizer） =====
    /// 必須数値項目の欠落・数値変換失敗
    #[error("入力項目が不十分です（{field}: {message}）")]
    InvalidField { field: String, message: String },

    // ===== 除数ドメインエラー（各計算機） =====
    /// トグルONの費目の除数が 0 以下
    #[error("{label}が0以下です。")]
    NonPositiveDivisor {
        /// フォーム上の項目キー
        field: &'static str,
        /// 利用者向けの項目名
        label: &'static str,
    },
}

impl CalcError {
    /// 数値変換失敗のエラーを組み立てる
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        CalcError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result 型エイリアス
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisor_error_message_names_the_field() {
        let err = CalcError::NonPositiveDivisor {
            field: "mold_count",
            label: "使用型の数出し数",
        };
        assert_eq!(err.to_string(), "使用型の数出し数が0以下です。");
    }
}
