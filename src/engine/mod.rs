// ==========================================
// 陶器製造原価見積システム - 計算エンジン層
// ==========================================
// 職責: 正規化済み入力 + トグル集合 → 原価内訳 の純粋計算
// 制約: 共有状態なし・I/Oなし・リトライなし
//       （1回の呼び出しは項目数に比例する有限回の算術のみ）
// ==========================================

pub mod assembler;
pub mod config;
pub mod error;
pub mod estimator;
pub mod manufacturing;
pub mod normalizer;
pub mod raw_material;

// コア型の再エクスポート
pub use assembler::{BreakdownAssembler, SalesAdminCosts};
pub use config::CalcConfig;
pub use error::{CalcError, CalcResult};
pub use estimator::CostEstimator;
pub use manufacturing::{ManufacturingCalculator, ManufacturingCosts};
pub use normalizer::InputNormalizer;
pub use raw_material::{RawMaterialCalculator, RawMaterialCosts};
