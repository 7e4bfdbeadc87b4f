// ==========================================
// 陶器製造原価見積システム - 費目トグルと任意レート
// ==========================================
// 職責: 「どの費目を含めるか」のフラグ集合と、
//       画面から任意入力される単価・能率・時間の型定義
// ==========================================

use crate::domain::FormMap;
use serde::{Deserialize, Serialize};

// ==========================================
// FeatureToggleSet - 費目トグル集合
// ==========================================

/// 費目名 → 「この費目を含めるか」のフラグ集合
///
/// リクエストごとに独立。トグル自体は永続化されない
/// （結果の内訳レコードだけが保存される）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggleSet {
    // ===== 原材料費（10項目） =====
    /// 土代
    pub include_dohdai: bool,
    /// 型代
    pub include_kata: bool,
    /// 乾燥燃料代
    pub include_drying_fuel: bool,
    /// 素焼燃料代
    pub include_bisque_fuel: bool,
    /// 撥水剤代
    pub include_hassui: bool,
    /// 絵具代
    pub include_paint: bool,
    /// ロゴ銅板代
    pub include_logo_copper: bool,
    /// 釉薬原料代
    pub include_glaze_material: bool,
    /// 本焼ガス代
    pub include_main_firing_gas: bool,
    /// 転写紙代
    pub include_transfer_sheet: bool,

    // ===== 製造費（15項目） =====
    /// 鋳込み賃
    pub include_chumikin: bool,
    /// 仕上げ賃
    pub include_shiagechin: bool,
    /// 配い物賃
    pub include_haiimonochin: bool,
    /// 生素地検品
    pub include_seisojiken: bool,
    /// 素焼入れ出し
    pub include_soyakeire_dashi: bool,
    /// 素焼払い物
    pub include_soyakebarimono: bool,
    /// 銅版貼り
    pub include_doban_hari: bool,
    /// 撥水加工賃
    pub include_hassui_kakouchin: bool,
    /// 絵付け費用
    pub include_shiyu_hiyou: bool,
    /// 施釉
    pub include_shiyu_cost: bool,
    /// 窯入り
    pub include_kamairi: bool,
    /// 窯出し
    pub include_kamadashi: bool,
    /// ハマスリ
    pub include_hamasuri: bool,
    /// 検品
    pub include_kenpin: bool,
    /// プリント加工賃
    pub include_print_kakouchin: bool,

    // ===== 販売・一般管理費（2項目） =====
    /// 納品人件費
    pub include_nouhin_jinkenhi: bool,
    /// ガソリン代
    pub include_gasoline: bool,
}

impl FeatureToggleSet {
    /// フォームのチェックボックス有無からトグル集合を構築する
    ///
    /// HTMLのチェックボックスはチェック時のみキーが送信されるため、
    /// 値は見ずキーの有無だけで判定する。
    pub fn from_form(form: &FormMap) -> Self {
        let on = |name: &str| form.contains_key(name);

        Self {
            include_dohdai: on("include_dohdai"),
            include_kata: on("include_kata"),
            include_drying_fuel: on("include_drying_fuel"),
            include_bisque_fuel: on("include_bisque_fuel"),
            include_hassui: on("include_hassui"),
            include_paint: on("include_paint"),
            include_logo_copper: on("include_logo_copper"),
            include_glaze_material: on("include_glaze_material"),
            include_main_firing_gas: on("include_main_firing_gas"),
            include_transfer_sheet: on("include_transfer_sheet"),

            include_chumikin: on("include_chumikin"),
            include_shiagechin: on("include_shiagechin"),
            include_haiimonochin: on("include_haiimonochin"),
            include_seisojiken: on("include_seisojiken"),
            include_soyakeire_dashi: on("include_soyakeire_dashi"),
            include_soyakebarimono: on("include_soyakebarimono"),
            include_doban_hari: on("include_doban_hari"),
            include_hassui_kakouchin: on("include_hassui_kakouchin"),
            include_shiyu_hiyou: on("include_shiyu_hiyou"),
            include_shiyu_cost: on("include_shiyu_cost"),
            include_kamairi: on("include_kamairi"),
            include_kamadashi: on("include_kamadashi"),
            include_hamasuri: on("include_hamasuri"),
            include_kenpin: on("include_kenpin"),
            include_print_kakouchin: on("include_print_kakouchin"),

            include_nouhin_jinkenhi: on("include_nouhin_jinkenhi"),
            include_gasoline: on("include_gasoline"),
        }
    }
}

// ==========================================
// ItemRates - 費目付随の任意入力
// ==========================================

/// 画面から任意入力される単価・能率・時間
///
/// 未入力（None）の費目はトグルONでもコスト0として静かにスキップする。
/// 入力済みで除数位置の値が 0 以下の場合はエンジン側でエラーになる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRates {
    // ===== 原材料費の単価 =====
    /// ロゴ銅板 単価（円/個）
    pub copper_unit_price: Option<f64>,
    /// 転写紙 単価（円/個）
    pub transfer_sheet_unit_price: Option<f64>,

    // ===== 製造費: 定額単価（円/個） =====
    /// 鋳込み賃 単価
    pub chumikin_unit: Option<f64>,
    /// 仕上げ賃 単価
    pub shiagechin_unit: Option<f64>,
    /// 銅版貼り 単価
    pub doban_hari_unit: Option<f64>,
    /// 絵付け費用 単価
    pub shiyu_hiyou_unit: Option<f64>,
    /// プリント加工賃 単価
    pub print_kakouchin_unit: Option<f64>,

    // ===== 製造費: 能率（個/時、除数） =====
    /// 配い物 能率
    pub sawaimono_work: Option<f64>,
    /// 生素地検品 能率
    pub seisojiken_work: Option<f64>,
    /// 素焼入れ出し 能率
    pub soyakeire_work: Option<f64>,
    /// 素焼払い物 能率
    pub soyakebarimono_work: Option<f64>,
    /// 撥水加工 能率
    pub hassui_kakouchin_work: Option<f64>,
    /// 施釉 能率
    pub shiyu_work: Option<f64>,

    // ===== 製造費: 窯作業時間（時間） =====
    /// 窯入り 時間
    pub kamairi_time: Option<f64>,
    /// 窯出し 時間
    pub kamadashi_time: Option<f64>,
    /// ハマスリ 時間
    pub hamasuri_time: Option<f64>,
    /// 検品 時間
    pub kenpin_time: Option<f64>,
}
