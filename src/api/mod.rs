// ==========================================
// 陶器製造原価見積システム - API層
// ==========================================
// 職責: エンジンとリポジトリを束ねた業務インターフェース
// 制約: 計算式を持たない（engine に委譲）
// 制約: SQL を持たない（repository に委譲）
// ==========================================

pub mod error;
pub mod estimate_api;

// コア型の再エクスポート
pub use error::{ApiError, ApiResult};
pub use estimate_api::{EstimateApi, EstimateHistory, PresetEntry};
