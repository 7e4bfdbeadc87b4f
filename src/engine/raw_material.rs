// ==========================================
// 陶器製造原価見積システム - 原材料費計算機
// ==========================================
// 職責: トグルONの原材料費10項目の算出・小計・比率
// 制約: トグルOFFの項目は厳密に 0（入力値に依存しない）
// ==========================================

use crate::domain::{EstimateInput, FeatureToggleSet, ItemRates};
use crate::engine::config::CalcConfig;
use crate::engine::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

// ==========================================
// RawMaterialCosts - 原材料費の算出結果
// ==========================================

/// 原材料費10項目と小計・比率
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialCosts {
    /// 土代
    pub dohdai_cost: f64,
    /// 型代
    pub kata_cost: f64,
    /// 乾燥燃料代
    pub drying_fuel_cost: f64,
    /// 素焼燃料代
    pub bisque_fuel_cost: f64,
    /// 撥水剤代
    pub hassui_cost: f64,
    /// 絵具代
    pub paint_cost: f64,
    /// ロゴ銅板代
    pub logo_copper_cost: f64,
    /// 釉薬原料代
    pub glaze_material_cost: f64,
    /// 本焼ガス代
    pub main_firing_gas_cost: f64,
    /// 転写紙代
    pub transfer_sheet_cost: f64,

    /// 原材料費小計
    pub raw_material_cost_total: f64,
    /// 原材料費比率（売価に対する百分率。売価0以下なら0）
    pub raw_material_cost_ratio: f64,
    /// 1個あたりの原材料費係数
    pub genzairyousyoukei_coefficient: f64,
}

// ==========================================
// RawMaterialCalculator - 原材料費計算機
// ==========================================
pub struct RawMaterialCalculator<'a> {
    config: &'a CalcConfig,
}

impl<'a> RawMaterialCalculator<'a> {
    pub fn new(config: &'a CalcConfig) -> Self {
        Self { config }
    }

    /// 原材料費を算出する
    ///
    /// # 引数
    /// - `input`: 正規化済み入力
    /// - `toggles`: 費目トグル集合
    /// - `rates`: 任意入力の単価（銅板・転写紙）
    ///
    /// # 返り値
    /// - `Ok(RawMaterialCosts)`: 各費目・小計・比率
    /// - `Err(CalcError::NonPositiveDivisor)`: トグルONの費目の除数が0以下
    pub fn calculate(
        &self,
        input: &EstimateInput,
        toggles: &FeatureToggleSet,
        rates: &ItemRates,
    ) -> CalcResult<RawMaterialCosts> {
        let c = self.config;
        let quantity = input.order_quantity as f64;

        let mut costs = RawMaterialCosts::default();
        // 1個あたりの係数（項目ごとの単価の合算）
        let mut unit_sum = 0.0;

        if toggles.include_dohdai {
            let unit = input.product_weight * c.dohdai_coefficient;
            costs.dohdai_cost = unit * quantity;
            unit_sum += unit;
        }

        if toggles.include_kata {
            if input.mold_count <= 0 {
                return Err(CalcError::NonPositiveDivisor {
                    field: "mold_count",
                    label: "使用型の数出し数",
                });
            }
            let unit = (input.mold_unit_price / input.mold_count as f64) / c.mold_divisor;
            costs.kata_cost = unit * quantity;
            unit_sum += unit;
        }

        if toggles.include_drying_fuel {
            let unit = input.product_weight * c.drying_fuel_coefficient;
            costs.drying_fuel_cost = unit * quantity;
            unit_sum += unit;
        }

        if toggles.include_bisque_fuel {
            let unit = input.product_weight * c.bisque_fuel_coefficient;
            costs.bisque_fuel_cost = unit * quantity;
            unit_sum += unit;
        }

        if toggles.include_hassui {
            let unit = input.product_weight * c.hassui_coefficient;
            costs.hassui_cost = unit * quantity;
            unit_sum += unit;
        }

        if toggles.include_paint {
            let unit = input.product_weight * c.paint_coefficient;
            costs.paint_cost = unit * quantity;
            unit_sum += unit;
        }

        // ロゴ銅板は外部から与えられる単価のみ（計算式なし）。
        // 単価未入力ならコスト0のままスキップする。
        if toggles.include_logo_copper {
            if let Some(unit) = rates.copper_unit_price {
                costs.logo_copper_cost = unit * quantity;
                unit_sum += unit;
            }
        }

        if toggles.include_glaze_material {
            if input.poly_count <= 0 {
                return Err(CalcError::NonPositiveDivisor {
                    field: "poly_count",
                    label: "ポリの枚数",
                });
            }
            let unit = input.glaze_cost / input.poly_count as f64;
            costs.glaze_material_cost = unit * quantity;
            unit_sum += unit;
        }

        if toggles.include_main_firing_gas {
            if input.kiln_count <= 0 {
                return Err(CalcError::NonPositiveDivisor {
                    field: "kiln_count",
                    label: "窯入数",
                });
            }
            costs.main_firing_gas_cost =
                (input.gas_unit_price * c.firing_gas_constant) / input.kiln_count as f64 * quantity;
            // 係数側は窯入数で割らない（窯1回分のガス代を足す従来仕様）
            unit_sum += input.gas_unit_price * c.firing_gas_constant;
        }

        if toggles.include_transfer_sheet {
            if let Some(unit) = rates.transfer_sheet_unit_price {
                costs.transfer_sheet_cost = unit * quantity;
                unit_sum += unit;
            }
        }

        costs.raw_material_cost_total = costs.dohdai_cost
            + costs.kata_cost
            + costs.drying_fuel_cost
            + costs.bisque_fuel_cost
            + costs.hassui_cost
            + costs.paint_cost
            + costs.logo_copper_cost
            + costs.glaze_material_cost
            + costs.main_firing_gas_cost
            + costs.transfer_sheet_cost;

        costs.genzairyousyoukei_coefficient = unit_sum;

        // 比率は売価に対する百分率。売価0以下なら0（NaN/∞を返さない）
        costs.raw_material_cost_ratio = if input.sales_price > 0.0 {
            costs.raw_material_cost_total / input.sales_price * 100.0
        } else {
            0.0
        };

        Ok(costs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> EstimateInput {
        EstimateInput {
            sales_price: 100.0,
            order_quantity: 10,
            product_weight: 50.0,
            mold_unit_price: 0.0,
            mold_count: 1,
            glaze_cost: 0.0,
            poly_count: 1,
            kiln_count: 1,
            gas_unit_price: 0.0,
            loss_defective: 0.0,
        }
    }

    #[test]
    fn test_all_toggles_off_is_zero() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);
        let costs = calc
            .calculate(&base_input(), &FeatureToggleSet::default(), &ItemRates::default())
            .unwrap();

        assert_eq!(costs.raw_material_cost_total, 0.0);
        assert_eq!(costs.raw_material_cost_ratio, 0.0);
        assert_eq!(costs.genzairyousyoukei_coefficient, 0.0);
    }

    #[test]
    fn test_dohdai_only() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);
        let toggles = FeatureToggleSet {
            include_dohdai: true,
            ..FeatureToggleSet::default()
        };

        let costs = calc
            .calculate(&base_input(), &toggles, &ItemRates::default())
            .unwrap();

        // 50g × 0.042 × 10個 = 21.0
        assert!((costs.dohdai_cost - 21.0).abs() < 1e-9);
        assert!((costs.raw_material_cost_total - 21.0).abs() < 1e-9);
        // 比率 = 21 / 100 × 100 = 21%
        assert!((costs.raw_material_cost_ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_kata_requires_positive_mold_count() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);
        let toggles = FeatureToggleSet {
            include_kata: true,
            ..FeatureToggleSet::default()
        };

        let mut input = base_input();
        input.mold_count = 0;
        let err = calc
            .calculate(&input, &toggles, &ItemRates::default())
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::NonPositiveDivisor {
                field: "mold_count",
                label: "使用型の数出し数",
            }
        );

        // 除数1なら有限値
        input.mold_count = 1;
        input.mold_unit_price = 200.0;
        let costs = calc.calculate(&input, &toggles, &ItemRates::default()).unwrap();
        // (200 / 1) / 100 × 10個 = 20.0
        assert!((costs.kata_cost - 20.0).abs() < 1e-9);
        assert!(costs.kata_cost.is_finite());
    }

    #[test]
    fn test_divisor_not_checked_when_toggled_off() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);

        let mut input = base_input();
        input.mold_count = 0;
        input.poly_count = 0;
        input.kiln_count = 0;

        // トグルOFFなら除数が0でもエラーにならない
        let costs = calc
            .calculate(&input, &FeatureToggleSet::default(), &ItemRates::default())
            .unwrap();
        assert_eq!(costs.raw_material_cost_total, 0.0);
    }

    #[test]
    fn test_glaze_material_and_firing_gas() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);
        let toggles = FeatureToggleSet {
            include_glaze_material: true,
            include_main_firing_gas: true,
            ..FeatureToggleSet::default()
        };

        let mut input = base_input();
        input.glaze_cost = 1200.0;
        input.poly_count = 4;
        input.gas_unit_price = 2.0;
        input.kiln_count = 100;

        let costs = calc.calculate(&input, &toggles, &ItemRates::default()).unwrap();
        // 釉薬: 1200 / 4 × 10個 = 3000
        assert!((costs.glaze_material_cost - 3000.0).abs() < 1e-9);
        // 本焼ガス: 2 × 370 / 100 × 10個 = 74
        assert!((costs.main_firing_gas_cost - 74.0).abs() < 1e-9);
        assert!(
            (costs.raw_material_cost_total
                - (costs.glaze_material_cost + costs.main_firing_gas_cost))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_unit_price_items_skip_when_rate_missing() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);
        let toggles = FeatureToggleSet {
            include_logo_copper: true,
            include_transfer_sheet: true,
            ..FeatureToggleSet::default()
        };

        // 単価未入力 → コスト0
        let costs = calc
            .calculate(&base_input(), &toggles, &ItemRates::default())
            .unwrap();
        assert_eq!(costs.logo_copper_cost, 0.0);
        assert_eq!(costs.transfer_sheet_cost, 0.0);

        // 単価入力 → 単価 × 発注数
        let rates = ItemRates {
            copper_unit_price: Some(30.0),
            transfer_sheet_unit_price: Some(12.5),
            ..ItemRates::default()
        };
        let costs = calc.calculate(&base_input(), &toggles, &rates).unwrap();
        assert!((costs.logo_copper_cost - 300.0).abs() < 1e-9);
        assert!((costs.transfer_sheet_cost - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_zero_when_sales_price_zero() {
        let config = CalcConfig::default();
        let calc = RawMaterialCalculator::new(&config);
        let toggles = FeatureToggleSet {
            include_dohdai: true,
            ..FeatureToggleSet::default()
        };

        let mut input = base_input();
        input.sales_price = 0.0;
        let costs = calc.calculate(&input, &toggles, &ItemRates::default()).unwrap();
        assert_eq!(costs.raw_material_cost_ratio, 0.0);
        assert!(costs.raw_material_cost_ratio.is_finite());
    }
}
