// ==========================================
// 陶器製造原価見積システム - 計算設定
// ==========================================
// 職責: 原価係数・時給・丸め桁数の一括管理
// 制約: 不変オブジェクトとしてエンジンに注入する
//       （プロセス全体のグローバル可変状態を持たない）
// ==========================================

use serde::{Deserialize, Serialize};

/// 原価計算の係数セット
///
/// 既定値は現行の工場実績値。テストや将来の係数改定では
/// 別の値を持つ `CalcConfig` を `CostEstimator` に渡せばよい。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// 土代係数（円/g）
    pub dohdai_coefficient: f64,
    /// 乾燥燃料係数（円/g）
    pub drying_fuel_coefficient: f64,
    /// 素焼燃料係数（円/g）
    pub bisque_fuel_coefficient: f64,
    /// 撥水剤係数（円/g）
    pub hassui_coefficient: f64,
    /// 絵具係数（円/g）
    pub paint_coefficient: f64,
    /// 本焼ガス定数（窯1回あたりのガス消費係数）
    pub firing_gas_constant: f64,
    /// 型代の除数（型の償却回数）
    pub mold_divisor: f64,
    /// 時給（円/時）
    pub hourly_wage: f64,
    /// 納品人件費の定額（円）
    pub nouhin_jinkenhi_amount: f64,
    /// ガソリン代の定額（円）
    pub gasoline_amount: f64,
    /// 最終丸め桁数（表示・保存の安定化のため最後に一度だけ適用）
    pub round_digits: u32,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            dohdai_coefficient: 0.042,
            drying_fuel_coefficient: 0.025,
            bisque_fuel_coefficient: 0.04,
            hassui_coefficient: 0.04,
            paint_coefficient: 0.05,
            firing_gas_constant: 370.0,
            mold_divisor: 100.0,
            hourly_wage: 3000.0,
            nouhin_jinkenhi_amount: 7500.0,
            gasoline_amount: 750.0,
            round_digits: 0,
        }
    }
}
