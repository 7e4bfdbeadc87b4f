// ==========================================
// 陶器製造原価見積システム - 入力正規化
// ==========================================
// 職責: 生フォーム（文字列マップ）→ 型付き入力レコード
// 方針: 厳格モード。必須項目の欠落・非数値は即エラー。
//       プレビュー（calculate）と確定（submit）の両経路で
//       同一の正規化を通し、同一入力＝同一結果を保証する。
// ==========================================

use crate::domain::{EstimateInput, FormMap, ItemRates};
use crate::engine::error::{CalcError, CalcResult};

// ==========================================
// InputNormalizer - 入力正規化器
// ==========================================
pub struct InputNormalizer {
    // 状態を持たない
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 必須の数値10項目を正規化する
    ///
    /// # 引数
    /// - `form`: 項目名 → 生文字列のフォームマップ
    ///
    /// # 返り値
    /// - `Ok(EstimateInput)`: 正規化済み入力
    /// - `Err(CalcError::InvalidField)`: 欠落または数値変換失敗（項目名付き）
    pub fn normalize(&self, form: &FormMap) -> CalcResult<EstimateInput> {
        Ok(EstimateInput {
            sales_price: self.require_f64(form, "sales_price")?,
            order_quantity: self.require_i64(form, "order_quantity")?,
            product_weight: self.require_f64(form, "product_weight")?,
            mold_unit_price: self.require_f64(form, "mold_unit_price")?,
            mold_count: self.require_i64(form, "mold_count")?,
            glaze_cost: self.require_f64(form, "glaze_cost")?,
            poly_count: self.require_i64(form, "poly_count")?,
            kiln_count: self.require_i64(form, "kiln_count")?,
            gas_unit_price: self.require_f64(form, "gas_unit_price")?,
            loss_defective: self.require_f64(form, "loss_defective")?,
        })
    }

    /// 任意入力の単価・能率・時間を取り出す
    ///
    /// 未入力・空文字は None（該当費目はコスト0でスキップ）。
    /// 入力があるのに数値でない場合は厳格モードどおりエラー。
    pub fn parse_item_rates(&self, form: &FormMap) -> CalcResult<ItemRates> {
        Ok(ItemRates {
            copper_unit_price: self.optional_f64(form, "copper_unit_price")?,
            transfer_sheet_unit_price: self.optional_f64(form, "transfer_sheet_unit_price")?,

            chumikin_unit: self.optional_f64(form, "chumikin_unit")?,
            shiagechin_unit: self.optional_f64(form, "shiagechin_unit")?,
            doban_hari_unit: self.optional_f64(form, "doban_hari_unit")?,
            shiyu_hiyou_unit: self.optional_f64(form, "shiyu_hiyou_unit")?,
            print_kakouchin_unit: self.optional_f64(form, "print_kakouchin_unit")?,

            sawaimono_work: self.optional_f64(form, "sawaimono_work")?,
            seisojiken_work: self.optional_f64(form, "seisojiken_work")?,
            soyakeire_work: self.optional_f64(form, "soyakeire_work")?,
            soyakebarimono_work: self.optional_f64(form, "soyakebarimono_work")?,
            hassui_kakouchin_work: self.optional_f64(form, "hassui_kakouchin_work")?,
            shiyu_work: self.optional_f64(form, "shiyu_work")?,

            kamairi_time: self.optional_f64(form, "kamairi_time")?,
            kamadashi_time: self.optional_f64(form, "kamadashi_time")?,
            hamasuri_time: self.optional_f64(form, "hamasuri_time")?,
            kenpin_time: self.optional_f64(form, "kenpin_time")?,
        })
    }

    // ==========================================
    // 補助メソッド
    // ==========================================

    /// 必須の浮動小数項目
    fn require_f64(&self, form: &FormMap, field: &str) -> CalcResult<f64> {
        let raw = self.require_raw(form, field)?;
        raw.parse::<f64>()
            .map_err(|_| CalcError::invalid_field(field, format!("数値に変換できません: {raw}")))
    }

    /// 必須の整数項目
    fn require_i64(&self, form: &FormMap, field: &str) -> CalcResult<i64> {
        let raw = self.require_raw(form, field)?;
        raw.parse::<i64>()
            .map_err(|_| CalcError::invalid_field(field, format!("整数に変換できません: {raw}")))
    }

    /// 必須項目の生文字列（前後空白を除去、空はエラー）
    fn require_raw<'a>(&self, form: &'a FormMap, field: &str) -> CalcResult<&'a str> {
        match form.get(field).map(|s| s.trim()) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(CalcError::invalid_field(field, "未入力です")),
        }
    }

    /// 任意項目の浮動小数（未入力・空は None）
    fn optional_f64(&self, form: &FormMap, field: &str) -> CalcResult<Option<f64>> {
        match form.get(field).map(|s| s.trim()) {
            Some(s) if !s.is_empty() => s
                .parse::<f64>()
                .map(Some)
                .map_err(|_| {
                    CalcError::invalid_field(field, format!("数値に変換できません: {s}"))
                }),
            _ => Ok(None),
        }
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
