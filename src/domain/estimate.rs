// ==========================================
// 陶器製造原価見積システム - 見積エンティティ
// ==========================================
// 職責: 正規化済み入力・原価内訳・履歴レコードの定義
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// EstimateInput - 正規化済みの見積入力
// ==========================================

/// 1回の見積リクエストに対して一度だけ構築される数値入力
///
/// Normalizer が生フォームから構築した後は不変。
/// このまま永続化はされない（内訳 CostBreakdown のみ保存される）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// 売価（円）
    pub sales_price: f64,
    /// 発注数（個）
    pub order_quantity: i64,
    /// 製品重量（g）
    pub product_weight: f64,
    /// 使用型単価（円）
    pub mold_unit_price: f64,
    /// 使用型の数出し数（除数。型代を含める場合は > 0 必須）
    pub mold_count: i64,
    /// 釉薬代（円）
    pub glaze_cost: f64,
    /// ポリの枚数（除数）
    pub poly_count: i64,
    /// 窯入数（除数）
    pub kiln_count: i64,
    /// ガス単価（円）
    pub gas_unit_price: f64,
    /// ロス・不良率（0.05 = 5%）
    pub loss_defective: f64,
}

// ==========================================
// CostBreakdown - 原価内訳（出力・永続化ペイロード）
// ==========================================

/// 1回の計算ごとに新規作成されるフラットな内訳レコード
///
/// 不変条件:
/// - トグルOFFの項目の *_cost は厳密に 0
/// - raw_material_cost_total = 原材料項目の合計
/// - manufacturing_cost_total = 製造項目の合計 + yield_coefficient
///
/// リポジトリには JSON 文字列として不透明に格納される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    // ===== 入力値（そのまま転記） =====
    pub sales_price: f64,
    pub order_quantity: i64,
    pub product_weight: f64,
    pub mold_unit_price: f64,
    pub mold_count: i64,
    pub kiln_count: i64,
    pub gas_unit_price: f64,
    pub loss_defective: f64,
    pub poly_count: i64,
    pub glaze_cost: f64,

    /// 参考合計（入力値の単純合算。詳細は assembler 参照）
    pub total_cost: f64,

    // ===== 原材料費 =====
    pub raw_material_cost_total: f64,
    pub raw_material_cost_ratio: f64,
    pub dohdai_cost: f64,
    pub kata_cost: f64,
    pub drying_fuel_cost: f64,
    pub bisque_fuel_cost: f64,
    pub hassui_cost: f64,
    pub paint_cost: f64,
    pub logo_copper_cost: f64,
    pub glaze_material_cost: f64,
    pub main_firing_gas_cost: f64,
    pub transfer_sheet_cost: f64,
    /// 原材料小計係数（1個あたりの原材料費）
    pub genzairyousyoukei_coefficient: f64,

    // ===== 製造費 =====
    pub chumikin_cost: f64,
    pub shiagechin_cost: f64,
    pub haiimonochin_cost: f64,
    pub seisojiken_cost: f64,
    pub soyakeire_dashi_cost: f64,
    pub soyakebarimono_cost: f64,
    pub doban_hari_cost: f64,
    pub hassui_kakouchin_cost: f64,
    pub shiyu_hiyou_cost: f64,
    pub shiyu_cost: f64,
    pub kamairi_cost: f64,
    pub kamadashi_cost: f64,
    pub hamasuri_cost: f64,
    pub kenpin_cost: f64,
    pub print_kakouchin_cost: f64,
    /// 歩留まり係数（ロス・不良の上乗せ額）
    pub yield_coefficient: f64,
    pub manufacturing_cost_total: f64,
    pub manufacturing_cost_ratio: f64,
    /// 製造小計係数（1個あたりの製造費、歩留まり前）
    pub seizousyoukei_coefficient: f64,

    // ===== 販売・一般管理費 =====
    pub sales_admin_cost_total: f64,
    pub sales_admin_cost_ratio: f64,

    // ===== 総括 =====
    pub production_cost_total: f64,
    pub production_plus_sales: f64,
    pub profit_amount: f64,
    pub profit_ratio: f64,
}

impl CostBreakdown {
    /// 転記済み入力値から EstimateInput を復元する
    ///
    /// プリセット（過去の見積の再利用）で使う。
    pub fn to_input(&self) -> EstimateInput {
        EstimateInput {
            sales_price: self.sales_price,
            order_quantity: self.order_quantity,
            product_weight: self.product_weight,
            mold_unit_price: self.mold_unit_price,
            mold_count: self.mold_count,
            glaze_cost: self.glaze_cost,
            poly_count: self.poly_count,
            kiln_count: self.kiln_count,
            gas_unit_price: self.gas_unit_price,
            loss_defective: self.loss_defective,
        }
    }
}

// ==========================================
// EstimateStatus - 見積レコードの状態
// ==========================================

/// 見積履歴の状態（active → sent / deleted）
///
/// コアの計算エンジンは status を読みも書きもしない。
/// 状態遷移はリポジトリ／API層の責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    /// 作成済み・送信可能（ユーザごとに最大3件）
    Active,
    /// 問い合わせ送信済み
    Sent,
    /// 論理削除済み（ユーザごとに最大30件保持）
    Deleted,
}

impl EstimateStatus {
    /// DB格納用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateStatus::Active => "active",
            EstimateStatus::Sent => "sent",
            EstimateStatus::Deleted => "deleted",
        }
    }

    /// DB文字列からの復元
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EstimateStatus::Active),
            "sent" => Some(EstimateStatus::Sent),
            "deleted" => Some(EstimateStatus::Deleted),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// EstimateRecord - 見積履歴レコード
// ==========================================

/// リポジトリに保存される1件の見積履歴
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRecord {
    /// レコードID（SQLite rowid）
    pub id: i64,
    /// 所有ユーザID（認証基盤が払い出す不透明な識別子）
    pub user_id: i64,
    /// 原価内訳ペイロード
    pub breakdown: CostBreakdown,
    /// 状態
    pub status: EstimateStatus,
    /// 作成日時
    pub created_at: NaiveDateTime,
    /// 送信日時（status=sent のとき設定）
    pub sent_at: Option<NaiveDateTime>,
    /// 削除日時（status=deleted のとき設定）
    pub deleted_at: Option<NaiveDateTime>,
}
