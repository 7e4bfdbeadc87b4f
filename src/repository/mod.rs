// ==========================================
// 陶器製造原価見積システム - リポジトリ層
// ==========================================
// 職責: 見積履歴のデータアクセス。DB詳細を上位層から隠蔽する
// 制約: すべてのクエリはパラメータ化（SQLインジェクション防止）
// 制約: 計算ロジックを含まない（保持件数ルールのみ担う）
// ==========================================

pub mod error;
pub mod estimate_repo;

// コア型の再エクスポート
pub use error::{RepositoryError, RepositoryResult};
pub use estimate_repo::{EstimateRepository, MAX_ACTIVE_ESTIMATES, MAX_DELETED_ESTIMATES};
