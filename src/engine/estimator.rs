// ==========================================
// 陶器製造原価見積システム - 見積オーケストレータ
// ==========================================
// 職責: 正規化 → 原材料費 → 製造費 → 組み立て の直列実行
// 制約: 純粋・同期。共有状態なし。並行呼び出しに調整不要。
// ==========================================

use crate::domain::{CostBreakdown, EstimateInput, FeatureToggleSet, FormMap, ItemRates};
use crate::engine::assembler::BreakdownAssembler;
use crate::engine::config::CalcConfig;
use crate::engine::error::CalcResult;
use crate::engine::manufacturing::ManufacturingCalculator;
use crate::engine::normalizer::InputNormalizer;
use crate::engine::raw_material::RawMaterialCalculator;

// ==========================================
// CostEstimator - 見積計算の入口
// ==========================================

/// 原価見積の計算エンジン
///
/// 呼び出し側（ルート層・API層）に公開する論理操作は1つ:
/// `estimate(form) → Ok(CostBreakdown) | Err(CalcError)`
pub struct CostEstimator {
    config: CalcConfig,
}

impl CostEstimator {
    /// 係数セットを注入して構築する
    pub fn new(config: CalcConfig) -> Self {
        Self { config }
    }

    /// 現在の係数セット
    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// 生フォームから原価内訳を計算する
    ///
    /// # 引数
    /// - `form`: 項目名 → 生文字列のフォームマップ
    ///   （数値は文字列、トグルはキーの有無）
    ///
    /// # 返り値
    /// - `Ok(CostBreakdown)`: 丸め済みの原価内訳
    /// - `Err(CalcError)`: 入力検証エラーまたは除数エラー
    pub fn estimate(&self, form: &FormMap) -> CalcResult<CostBreakdown> {
        let normalizer = InputNormalizer::new();
        let input = normalizer.normalize(form)?;
        let toggles = FeatureToggleSet::from_form(form);
        let rates = normalizer.parse_item_rates(form)?;

        self.estimate_normalized(&input, &toggles, &rates)
    }

    /// 正規化済み入力から原価内訳を計算する
    ///
    /// プリセット再計算など、型付き入力を既に持つ呼び出し側向け。
    pub fn estimate_normalized(
        &self,
        input: &EstimateInput,
        toggles: &FeatureToggleSet,
        rates: &ItemRates,
    ) -> CalcResult<CostBreakdown> {
        let assembler = BreakdownAssembler::new(&self.config);
        let total_cost = assembler.reference_total_cost(input);

        let raw = RawMaterialCalculator::new(&self.config).calculate(input, toggles, rates)?;

        let manufacturing = ManufacturingCalculator::new(&self.config).calculate(
            input,
            toggles,
            rates,
            raw.raw_material_cost_total,
            total_cost,
        )?;

        let sales_admin =
            assembler.sales_admin_costs(toggles, input.order_quantity, total_cost);

        let breakdown = assembler.assemble(input, &raw, &manufacturing, &sales_admin, total_cost);

        tracing::debug!(
            raw_material_cost_total = breakdown.raw_material_cost_total,
            manufacturing_cost_total = breakdown.manufacturing_cost_total,
            profit_amount = breakdown.profit_amount,
            "見積計算完了"
        );

        Ok(breakdown)
    }
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::new(CalcConfig::default())
    }
}
