// ==========================================
// 陶器製造原価見積システム - 製造費計算機
// ==========================================
// 職責: トグルONの製造費15項目の算出・歩留まり上乗せ・小計・比率
// 計算形: 定額単価 × 発注数 / 時給 ÷ 能率 × 発注数 / 時給 × 時間 ÷ 窯入数 × 発注数
// ==========================================

use crate::domain::{EstimateInput, FeatureToggleSet, ItemRates};
use crate::engine::config::CalcConfig;
use crate::engine::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

// ==========================================
// ManufacturingCosts - 製造費の算出結果
// ==========================================

/// 製造費15項目と歩留まり・小計・比率
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingCosts {
    /// 鋳込み賃
    pub chumikin_cost: f64,
    /// 仕上げ賃
    pub shiagechin_cost: f64,
    /// 配い物賃
    pub haiimonochin_cost: f64,
    /// 生素地検品
    pub seisojiken_cost: f64,
    /// 素焼入れ出し
    pub soyakeire_dashi_cost: f64,
    /// 素焼払い物
    pub soyakebarimono_cost: f64,
    /// 銅版貼り
    pub doban_hari_cost: f64,
    /// 撥水加工賃
    pub hassui_kakouchin_cost: f64,
    /// 絵付け費用
    pub shiyu_hiyou_cost: f64,
    /// 施釉
    pub shiyu_cost: f64,
    /// 窯入り
    pub kamairi_cost: f64,
    /// 窯出し
    pub kamadashi_cost: f64,
    /// ハマスリ
    pub hamasuri_cost: f64,
    /// 検品
    pub kenpin_cost: f64,
    /// プリント加工賃
    pub print_kakouchin_cost: f64,

    /// 1個あたりの製造費係数（歩留まり前）
    pub seizousyoukei_coefficient: f64,
    /// 歩留まり係数 = (原材料小計 + 製造小計) × ロス・不良率
    pub yield_coefficient: f64,
    /// 製造費合計 = 製造小計 + 歩留まり係数
    pub manufacturing_cost_total: f64,
    /// 製造費比率（参考合計に対する百分率。合計0以下なら0）
    pub manufacturing_cost_ratio: f64,
}

// ==========================================
// ManufacturingCalculator - 製造費計算機
// ==========================================
pub struct ManufacturingCalculator<'a> {
    config: &'a CalcConfig,
}

impl<'a> ManufacturingCalculator<'a> {
    pub fn new(config: &'a CalcConfig) -> Self {
        Self { config }
    }

    /// 製造費を算出する
    ///
    /// # 引数
    /// - `input`: 正規化済み入力
    /// - `toggles`: 費目トグル集合
    /// - `rates`: 任意入力の単価・能率・時間
    /// - `raw_material_cost_total`: 原材料費小計（歩留まり上乗せの基礎）
    /// - `total_cost`: 参考合計（比率の分母）
    ///
    /// # 返り値
    /// - `Ok(ManufacturingCosts)`: 各費目・歩留まり・小計・比率
    /// - `Err(CalcError::NonPositiveDivisor)`: トグルONの費目の除数が0以下
    pub fn calculate(
        &self,
        input: &EstimateInput,
        toggles: &FeatureToggleSet,
        rates: &ItemRates,
        raw_material_cost_total: f64,
        total_cost: f64,
    ) -> CalcResult<ManufacturingCosts> {
        let quantity = input.order_quantity as f64;

        let mut costs = ManufacturingCosts {
            // ===== 定額単価の費目（単価 × 発注数） =====
            chumikin_cost: self.flat_rate(toggles.include_chumikin, rates.chumikin_unit, quantity),
            shiagechin_cost: self.flat_rate(
                toggles.include_shiagechin,
                rates.shiagechin_unit,
                quantity,
            ),
            doban_hari_cost: self.flat_rate(
                toggles.include_doban_hari,
                rates.doban_hari_unit,
                quantity,
            ),
            shiyu_hiyou_cost: self.flat_rate(
                toggles.include_shiyu_hiyou,
                rates.shiyu_hiyou_unit,
                quantity,
            ),
            print_kakouchin_cost: self.flat_rate(
                toggles.include_print_kakouchin,
                rates.print_kakouchin_unit,
                quantity,
            ),

            // ===== 能率の費目（時給 ÷ 能率 × 発注数） =====
            seisojiken_cost: self.hourly_rate(
                toggles.include_seisojiken,
                rates.seisojiken_work,
                quantity,
                "seisojiken_work",
                "生素地検品の能率",
            )?,
            soyakeire_dashi_cost: self.hourly_rate(
                toggles.include_soyakeire_dashi,
                rates.soyakeire_work,
                quantity,
                "soyakeire_work",
                "素焼入れ出しの能率",
            )?,
            soyakebarimono_cost: self.hourly_rate(
                toggles.include_soyakebarimono,
                rates.soyakebarimono_work,
                quantity,
                "soyakebarimono_work",
                "素焼払い物の能率",
            )?,
            hassui_kakouchin_cost: self.hourly_rate(
                toggles.include_hassui_kakouchin,
                rates.hassui_kakouchin_work,
                quantity,
                "hassui_kakouchin_work",
                "撥水加工の能率",
            )?,
            shiyu_cost: self.hourly_rate(
                toggles.include_shiyu_cost,
                rates.shiyu_work,
                quantity,
                "shiyu_work",
                "施釉の能率",
            )?,

            // ===== 窯作業の費目（時給 × 時間 ÷ 窯入数 × 発注数） =====
            kamairi_cost: self.kiln_shared(
                toggles.include_kamairi,
                rates.kamairi_time,
                input,
                quantity,
                "kamairi_time",
                "窯入りの時間",
            )?,
            kamadashi_cost: self.kiln_shared(
                toggles.include_kamadashi,
                rates.kamadashi_time,
                input,
                quantity,
                "kamadashi_time",
                "窯出しの時間",
            )?,
            hamasuri_cost: self.kiln_shared(
                toggles.include_hamasuri,
                rates.hamasuri_time,
                input,
                quantity,
                "hamasuri_time",
                "ハマスリの時間",
            )?,
            kenpin_cost: self.kiln_shared(
                toggles.include_kenpin,
                rates.kenpin_time,
                input,
                quantity,
                "kenpin_time",
                "検品の時間",
            )?,

            ..ManufacturingCosts::default()
        };

        // 配い物賃だけは型単価を能率で割る従来仕様
        costs.haiimonochin_cost = if toggles.include_haiimonochin {
            match rates.sawaimono_work {
                None => 0.0,
                Some(work) if work <= 0.0 => {
                    return Err(CalcError::NonPositiveDivisor {
                        field: "sawaimono_work",
                        label: "配い物の能率",
                    });
                }
                Some(work) => input.mold_unit_price / work * quantity,
            }
        } else {
            0.0
        };

        // 歩留まり前の小計
        let subtotal = costs.chumikin_cost
            + costs.shiagechin_cost
            + costs.haiimonochin_cost
            + costs.seisojiken_cost
            + costs.soyakeire_dashi_cost
            + costs.soyakebarimono_cost
            + costs.doban_hari_cost
            + costs.hassui_kakouchin_cost
            + costs.shiyu_hiyou_cost
            + costs.shiyu_cost
            + costs.kamairi_cost
            + costs.kamadashi_cost
            + costs.hamasuri_cost
            + costs.kenpin_cost
            + costs.print_kakouchin_cost;

        costs.seizousyoukei_coefficient = if input.order_quantity != 0 {
            subtotal / quantity
        } else {
            0.0
        };

        // 歩留まり上乗せ: 不良で廃棄される分の原価を製造費側に積む
        costs.yield_coefficient = (raw_material_cost_total + subtotal) * input.loss_defective;
        costs.manufacturing_cost_total = subtotal + costs.yield_coefficient;

        costs.manufacturing_cost_ratio = if total_cost > 0.0 {
            costs.manufacturing_cost_total / total_cost * 100.0
        } else {
            0.0
        };

        Ok(costs)
    }

    // ==========================================
    // 計算形ごとの補助メソッド
    // ==========================================

    /// 定額単価: 単価 × 発注数（単価未入力は0）
    fn flat_rate(&self, included: bool, unit: Option<f64>, quantity: f64) -> f64 {
        if !included {
            return 0.0;
        }
        unit.unwrap_or(0.0) * quantity
    }

    /// 能率ベース: 時給 ÷ 能率 × 発注数
    ///
    /// 能率未入力はスキップ（0）。入力済みで0以下は除数エラー。
    fn hourly_rate(
        &self,
        included: bool,
        work: Option<f64>,
        quantity: f64,
        field: &'static str,
        label: &'static str,
    ) -> CalcResult<f64> {
        if !included {
            return Ok(0.0);
        }
        match work {
            None => Ok(0.0),
            Some(w) if w <= 0.0 => Err(CalcError::NonPositiveDivisor { field, label }),
            Some(w) => Ok(self.config.hourly_wage / w * quantity),
        }
    }

    /// 窯作業: 時給 × 時間 ÷ 窯入数 × 発注数
    ///
    /// 時間未入力はスキップ（0）。窯入数・時間が0以下は除数エラー。
    fn kiln_shared(
        &self,
        included: bool,
        time: Option<f64>,
        input: &EstimateInput,
        quantity: f64,
        field: &'static str,
        label: &'static str,
    ) -> CalcResult<f64> {
        if !included {
            return Ok(0.0);
        }
        if input.kiln_count <= 0 {
            return Err(CalcError::NonPositiveDivisor {
                field: "kiln_count",
                label: "窯入数",
            });
        }
        match time {
            None => Ok(0.0),
            Some(t) if t <= 0.0 => Err(CalcError::NonPositiveDivisor { field, label }),
            Some(t) => {
                Ok(self.config.hourly_wage * t / input.kiln_count as f64 * quantity)
            }
        }
    }
}
