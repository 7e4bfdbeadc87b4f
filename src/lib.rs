// ==========================================
// 陶器製造原価見積システム - コアライブラリ
// ==========================================
// 技術スタック: Rust + SQLite
// システム定位: 原価見積の計算エンジン + 見積履歴管理
// ==========================================

// ==========================================
// モジュール宣言
// ==========================================

// 領域層 - エンティティと型
pub mod domain;

// エンジン層 - 原価計算ロジック
pub mod engine;

// リポジトリ層 - 見積履歴の永続化
pub mod repository;

// API層 - 業務インターフェース
pub mod api;

// データベース基盤（接続初期化 / PRAGMA 統一）
pub mod db;

// ログシステム
pub mod logging;

// ==========================================
// コア型の再エクスポート
// ==========================================

// 領域型
pub use domain::{
    CostBreakdown, EstimateInput, EstimateRecord, EstimateStatus, FeatureToggleSet, FormMap,
    ItemRates,
};

// エンジン
pub use engine::{
    CalcConfig, CalcError, CalcResult, CostEstimator, ManufacturingCosts, RawMaterialCosts,
    SalesAdminCosts,
};

// リポジトリ
pub use repository::{EstimateRepository, RepositoryError, RepositoryResult};

// API
pub use api::{ApiError, ApiResult, EstimateApi, EstimateHistory, PresetEntry};

// ==========================================
// 定数定義
// ==========================================

// システムバージョン
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// システム名
pub const APP_NAME: &str = "陶器製造原価見積システム";
