// ==========================================
// 陶器製造原価見積システム - 領域モデル層
// ==========================================
// 職責: 見積入力・原価内訳・履歴レコードの型定義
// 制約: データアクセスロジックを含まない、計算ロジックを含まない
// ==========================================

pub mod estimate;
pub mod toggles;

// コア型の再エクスポート
pub use estimate::{CostBreakdown, EstimateInput, EstimateRecord, EstimateStatus};
pub use toggles::{FeatureToggleSet, ItemRates};

use std::collections::HashMap;

/// 画面から届く生のフォームデータ
///
/// 数値項目は文字列のまま、チェックボックスはキーの有無で表現される。
pub type FormMap = HashMap<String, String>;
