// ==========================================
// 陶器製造原価見積システム - 内訳組み立て
// ==========================================
// 職責: 販売・一般管理費の加算、総括指標の導出、最終丸め
// 制約: 丸めは全演算の後に一度だけ適用する（誤差の累積を避ける）
// ==========================================

use crate::domain::{CostBreakdown, EstimateInput, FeatureToggleSet};
use crate::engine::config::CalcConfig;
use crate::engine::manufacturing::ManufacturingCosts;
use crate::engine::raw_material::RawMaterialCosts;
use serde::{Deserialize, Serialize};

// ==========================================
// SalesAdminCosts - 販売・一般管理費
// ==========================================

/// 販売・一般管理費の小計と比率
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesAdminCosts {
    /// 1個あたりの販管費（定額合算 ÷ 発注数）
    pub sales_admin_cost_total: f64,
    /// 販管費比率（参考合計に対する百分率。合計0以下なら0）
    pub sales_admin_cost_ratio: f64,
}

// ==========================================
// BreakdownAssembler - 内訳組み立て
// ==========================================
pub struct BreakdownAssembler<'a> {
    config: &'a CalcConfig,
}

impl<'a> BreakdownAssembler<'a> {
    pub fn new(config: &'a CalcConfig) -> Self {
        Self { config }
    }

    /// 参考合計を算出する
    ///
    /// 入力値（売価・数量・重量・単価・個数・率）の単純合算。
    /// 従来システムの挙動をそのまま踏襲した暫定集計で、
    /// 各比率の分母もこの値に揃えている。
    pub fn reference_total_cost(&self, input: &EstimateInput) -> f64 {
        input.sales_price
            + input.order_quantity as f64
            + input.product_weight
            + input.mold_unit_price
            + input.mold_count as f64
            + input.kiln_count as f64
            + input.gas_unit_price
            + input.loss_defective
    }

    /// 販売・一般管理費を算出する
    ///
    /// 定額のトグル項目（納品人件費・ガソリン代）を合算し、
    /// 発注数で割って1個あたりに換算する。
    pub fn sales_admin_costs(
        &self,
        toggles: &FeatureToggleSet,
        order_quantity: i64,
        total_cost: f64,
    ) -> SalesAdminCosts {
        let mut flat_sum = 0.0;
        if toggles.include_nouhin_jinkenhi {
            flat_sum += self.config.nouhin_jinkenhi_amount;
        }
        if toggles.include_gasoline {
            flat_sum += self.config.gasoline_amount;
        }

        let sales_admin_cost_total = if order_quantity != 0 {
            flat_sum / order_quantity as f64
        } else {
            0.0
        };

        let sales_admin_cost_ratio = if total_cost > 0.0 {
            sales_admin_cost_total / total_cost * 100.0
        } else {
            0.0
        };

        SalesAdminCosts {
            sales_admin_cost_total,
            sales_admin_cost_ratio,
        }
    }

    /// 最終的な原価内訳を組み立てる
    ///
    /// 総括指標の導出:
    /// - production_cost_total = 原材料費合計 + 製造費合計
    /// - production_plus_sales = production_cost_total + 販管費
    /// - profit_amount = 参考合計 − production_plus_sales
    /// - profit_ratio = profit_amount ÷ 参考合計 × 100（合計0以下なら0）
    ///
    /// 最後に全浮動小数フィールドを設定桁数へ一度だけ丸める。
    pub fn assemble(
        &self,
        input: &EstimateInput,
        raw: &RawMaterialCosts,
        manufacturing: &ManufacturingCosts,
        sales_admin: &SalesAdminCosts,
        total_cost: f64,
    ) -> CostBreakdown {
        let production_cost_total =
            raw.raw_material_cost_total + manufacturing.manufacturing_cost_total;
        let production_plus_sales = production_cost_total + sales_admin.sales_admin_cost_total;

        let profit_amount = total_cost - production_plus_sales;
        let profit_ratio = if total_cost > 0.0 {
            profit_amount / total_cost * 100.0
        } else {
            0.0
        };

        let mut breakdown = CostBreakdown {
            sales_price: input.sales_price,
            order_quantity: input.order_quantity,
            product_weight: input.product_weight,
            mold_unit_price: input.mold_unit_price,
            mold_count: input.mold_count,
            kiln_count: input.kiln_count,
            gas_unit_price: input.gas_unit_price,
            loss_defective: input.loss_defective,
            poly_count: input.poly_count,
            glaze_cost: input.glaze_cost,
            total_cost,

            raw_material_cost_total: raw.raw_material_cost_total,
            raw_material_cost_ratio: raw.raw_material_cost_ratio,
            dohdai_cost: raw.dohdai_cost,
            kata_cost: raw.kata_cost,
            drying_fuel_cost: raw.drying_fuel_cost,
            bisque_fuel_cost: raw.bisque_fuel_cost,
            hassui_cost: raw.hassui_cost,
            paint_cost: raw.paint_cost,
            logo_copper_cost: raw.logo_copper_cost,
            glaze_material_cost: raw.glaze_material_cost,
            main_firing_gas_cost: raw.main_firing_gas_cost,
            transfer_sheet_cost: raw.transfer_sheet_cost,
            genzairyousyoukei_coefficient: raw.genzairyousyoukei_coefficient,

            chumikin_cost: manufacturing.chumikin_cost,
            shiagechin_cost: manufacturing.shiagechin_cost,
            haiimonochin_cost: manufacturing.haiimonochin_cost,
            seisojiken_cost: manufacturing.seisojiken_cost,
            soyakeire_dashi_cost: manufacturing.soyakeire_dashi_cost,
            soyakebarimono_cost: manufacturing.soyakebarimono_cost,
            doban_hari_cost: manufacturing.doban_hari_cost,
            hassui_kakouchin_cost: manufacturing.hassui_kakouchin_cost,
            shiyu_hiyou_cost: manufacturing.shiyu_hiyou_cost,
            shiyu_cost: manufacturing.shiyu_cost,
            kamairi_cost: manufacturing.kamairi_cost,
            kamadashi_cost: manufacturing.kamadashi_cost,
            hamasuri_cost: manufacturing.hamasuri_cost,
            kenpin_cost: manufacturing.kenpin_cost,
            print_kakouchin_cost: manufacturing.print_kakouchin_cost,
            yield_coefficient: manufacturing.yield_coefficient,
            manufacturing_cost_total: manufacturing.manufacturing_cost_total,
            manufacturing_cost_ratio: manufacturing.manufacturing_cost_ratio,
            seizousyoukei_coefficient: manufacturing.seizousyoukei_coefficient,

            sales_admin_cost_total: sales_admin.sales_admin_cost_total,
            sales_admin_cost_ratio: sales_admin.sales_admin_cost_ratio,

            production_cost_total,
            production_plus_sales,
            profit_amount,
            profit_ratio,
        };

        round_breakdown(&mut breakdown, self.config.round_digits);
        breakdown
    }
}

// ==========================================
// 丸め処理
// ==========================================

/// 指定桁数への四捨五入
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// 内訳の全浮動小数フィールドを丸める
///
/// 整数フィールド（発注数・型数・ポリ枚数・窯入数）は対象外。
pub fn round_breakdown(breakdown: &mut CostBreakdown, digits: u32) {
    let fields: [&mut f64; 43] = [
        &mut breakdown.sales_price,
        &mut breakdown.product_weight,
        &mut breakdown.mold_unit_price,
        &mut breakdown.gas_unit_price,
        &mut breakdown.loss_defective,
        &mut breakdown.glaze_cost,
        &mut breakdown.total_cost,
        &mut breakdown.raw_material_cost_total,
        &mut breakdown.raw_material_cost_ratio,
        &mut breakdown.dohdai_cost,
        &mut breakdown.kata_cost,
        &mut breakdown.drying_fuel_cost,
        &mut breakdown.bisque_fuel_cost,
        &mut breakdown.hassui_cost,
        &mut breakdown.paint_cost,
        &mut breakdown.logo_copper_cost,
        &mut breakdown.glaze_material_cost,
        &mut breakdown.main_firing_gas_cost,
        &mut breakdown.transfer_sheet_cost,
        &mut breakdown.genzairyousyoukei_coefficient,
        &mut breakdown.chumikin_cost,
        &mut breakdown.shiagechin_cost,
        &mut breakdown.haiimonochin_cost,
        &mut breakdown.seisojiken_cost,
        &mut breakdown.soyakeire_dashi_cost,
        &mut breakdown.soyakebarimono_cost,
        &mut breakdown.doban_hari_cost,
        &mut breakdown.hassui_kakouchin_cost,
        &mut breakdown.shiyu_hiyou_cost,
        &mut breakdown.shiyu_cost,
        &mut breakdown.kamairi_cost,
        &mut breakdown.kamadashi_cost,
        &mut breakdown.hamasuri_cost,
        &mut breakdown.kenpin_cost,
        &mut breakdown.print_kakouchin_cost,
        &mut breakdown.yield_coefficient,
        &mut breakdown.manufacturing_cost_total,
        &mut breakdown.manufacturing_cost_ratio,
        &mut breakdown.seizousyoukei_coefficient,
        &mut breakdown.sales_admin_cost_total,
        &mut breakdown.sales_admin_cost_ratio,
        &mut breakdown.production_cost_total,
        &mut breakdown.production_plus_sales,
    ];
    for field in fields {
        *field = round_to(*field, digits);
    }
    breakdown.profit_amount = round_to(breakdown.profit_amount, digits);
    breakdown.profit_ratio = round_to(breakdown.profit_ratio, digits);
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
    fn test_reference_total_cost_is_plain_sum() {
        let config = CalcConfig::default();
        let assembler = BreakdownAssembler::new(&config);
        // 100 + 10 + 50 + 0 + 1 + 1 + 0 + 0 = 162
        assert_eq!(assembler.reference_total_cost(&base_input()), 162.0);
    }

    #[test]
    fn test_sales_admin_flat_amounts() {
        let config = CalcConfig::default();
        let assembler = BreakdownAssembler::new(&config);

        let toggles = FeatureToggleSet {
            include_nouhin_jinkenhi: true,
            include_gasoline: true,
            ..FeatureToggleSet::default()
        };
        let costs = assembler.sales_admin_costs(&toggles, 10, 1000.0);
        // (7500 + 750) ÷ 10個 = 825
        assert!((costs.sales_admin_cost_total - 825.0).abs() < 1e-9);
        // 825 ÷ 1000 × 100 = 82.5%
        assert!((costs.sales_admin_cost_ratio - 82.5).abs() < 1e-9);

        // トグルOFFなら0
        let costs = assembler.sales_admin_costs(&FeatureToggleSet::default(), 10, 1000.0);
        assert_eq!(costs.sales_admin_cost_total, 0.0);

        // 発注数0でも0除算しない
        let costs = assembler.sales_admin_costs(&toggles, 0, 1000.0);
        assert_eq!(costs.sales_admin_cost_total, 0.0);
    }

    #[test]
    fn test_profit_derivation() {
        let config = CalcConfig::default();
        let assembler = BreakdownAssembler::new(&config);

        let raw = RawMaterialCosts {
            raw_material_cost_total: 30.0,
            ..RawMaterialCosts::default()
        };
        let manufacturing = ManufacturingCosts {
            manufacturing_cost_total: 50.0,
            ..ManufacturingCosts::default()
        };
        let sales_admin = SalesAdminCosts {
            sales_admin_cost_total: 20.0,
            sales_admin_cost_ratio: 10.0,
        };

        let breakdown =
            assembler.assemble(&base_input(), &raw, &manufacturing, &sales_admin, 200.0);
        assert_eq!(breakdown.production_cost_total, 80.0);
        assert_eq!(breakdown.production_plus_sales, 100.0);
        assert_eq!(breakdown.profit_amount, 100.0);
        assert_eq!(breakdown.profit_ratio, 50.0);
    }

    #[test]
    fn test_profit_ratio_zero_when_total_cost_zero() {
        let config = CalcConfig::default();
        let assembler = BreakdownAssembler::new(&config);

        let breakdown = assembler.assemble(
            &base_input(),
            &RawMaterialCosts::default(),
            &ManufacturingCosts::default(),
            &SalesAdminCosts::default(),
            0.0,
        );
        assert_eq!(breakdown.profit_ratio, 0.0);
        assert!(breakdown.profit_ratio.is_finite());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(21.456, 0), 21.0);
        assert_eq!(round_to(21.456, 2), 21.46);
        assert_eq!(round_to(-1.5, 0), -2.0);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let config = CalcConfig {
            round_digits: 2,
            ..CalcConfig::default()
        };
        let assembler = BreakdownAssembler::new(&config);

        let raw = RawMaterialCosts {
            raw_material_cost_total: 33.3333,
            dohdai_cost: 33.3333,
            raw_material_cost_ratio: 33.3333,
            ..RawMaterialCosts::default()
        };
        let breakdown = assembler.assemble(
            &base_input(),
            &raw,
            &ManufacturingCosts::default(),
            &SalesAdminCosts::default(),
            162.0,
        );

        let mut twice = breakdown.clone();
        round_breakdown(&mut twice, 2);
        assert_eq!(breakdown, twice);
    }
}
