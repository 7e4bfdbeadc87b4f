// ==========================================
// 陶器製造原価見積システム - 見積計算の結合テスト
// ==========================================
// 生フォーム → CostBreakdown の経路を丸ごと検証する
// ==========================================

use ceramic_estimate::{CalcError, CostEstimator, FormMap};

/// 最小構成のフォーム（必須10項目のみ、トグルは全OFF）
fn base_form() -> FormMap {
    let mut form = FormMap::new();
    form.insert("sales_price".into(), "100".into());
    form.insert("order_quantity".into(), "10".into());
    form.insert("product_weight".into(), "50".into());
    form.insert("mold_unit_price".into(), "0".into());
    form.insert("mold_count".into(), "1".into());
    form.insert("glaze_cost".into(), "0".into());
    form.insert("poly_count".into(), "1".into());
    form.insert("kiln_count".into(), "1".into());
    form.insert("gas_unit_price".into(), "0".into());
    form.insert("loss_defective".into(), "0".into());
    form
}

#[test]
fn test_all_toggles_off_yields_zero_costs() {
    let estimator = CostEstimator::default();
    let breakdown = estimator.estimate(&base_form()).unwrap();

    assert_eq!(breakdown.dohdai_cost, 0.0);
    assert_eq!(breakdown.kamairi_cost, 0.0);
    assert_eq!(breakdown.raw_material_cost_total, 0.0);
    assert_eq!(breakdown.manufacturing_cost_total, 0.0);
    assert_eq!(breakdown.sales_admin_cost_total, 0.0);
    assert_eq!(breakdown.production_cost_total, 0.0);

    // 参考合計 = 100 + 10 + 50 + 0 + 1 + 1 + 0 + 0 = 162
    assert_eq!(breakdown.total_cost, 162.0);
    // 原価0なので利益は参考合計そのもの
    assert_eq!(breakdown.profit_amount, 162.0);
    assert_eq!(breakdown.profit_ratio, 100.0);
}

#[test]
fn test_dohdai_only_scenario() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.insert("include_dohdai".into(), "on".into());

    let breakdown = estimator.estimate(&form).unwrap();

    // 50g × 0.042 × 10個 = 21.0
    assert_eq!(breakdown.dohdai_cost, 21.0);
    assert_eq!(breakdown.raw_material_cost_total, 21.0);
    // 比率 = 21 / 売価100 × 100 = 21%
    assert_eq!(breakdown.raw_material_cost_ratio, 21.0);
    // 利益 = 162 − 21 = 141、比率は0桁丸めで87%
    assert_eq!(breakdown.profit_amount, 141.0);
    assert_eq!(breakdown.profit_ratio, 87.0);
}

#[test]
fn test_mold_division_error_names_the_item() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.insert("include_kata".into(), "on".into());
    form.insert("mold_count".into(), "0".into());

    let err = estimator.estimate(&form).unwrap_err();
    assert_eq!(err.to_string(), "使用型の数出し数が0以下です。");

    // 除数1なら有限値で成功する
    form.insert("mold_count".into(), "1".into());
    form.insert("mold_unit_price".into(), "200".into());
    let breakdown = estimator.estimate(&form).unwrap();
    assert!(breakdown.kata_cost.is_finite());
    // (200 ÷ 1) ÷ 100 × 10個 = 20.0
    assert_eq!(breakdown.kata_cost, 20.0);
}

#[test]
fn test_kiln_division_error() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.insert("include_kamairi".into(), "on".into());
    form.insert("kamairi_time".into(), "2".into());
    form.insert("kiln_count".into(), "0".into());

    let err = estimator.estimate(&form).unwrap_err();
    assert_eq!(
        err,
        CalcError::NonPositiveDivisor {
            field: "kiln_count",
            label: "窯入数",
        }
    );
}

#[test]
fn test_missing_required_field_is_rejected() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.remove("product_weight");

    let err = estimator.estimate(&form).unwrap_err();
    match err {
        CalcError::InvalidField { field, .. } => assert_eq!(field, "product_weight"),
        other => panic!("expected InvalidField, got {other:?}"),
    }
}

#[test]
fn test_yield_surcharge_scenario() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.insert("include_dohdai".into(), "on".into());
    form.insert("include_chumikin".into(), "on".into());
    form.insert("chumikin_unit".into(), "5".into());
    form.insert("loss_defective".into(), "0.1".into());

    let breakdown = estimator.estimate(&form).unwrap();

    // 原材料 21、製造小計 5 × 10 = 50
    assert_eq!(breakdown.dohdai_cost, 21.0);
    assert_eq!(breakdown.chumikin_cost, 50.0);
    // 歩留まり = (21 + 50) × 0.1 = 7.1 → 0桁丸めで7
    assert_eq!(breakdown.yield_coefficient, 7.0);
    // 製造費合計 = 50 + 7.1 = 57.1 → 57
    assert_eq!(breakdown.manufacturing_cost_total, 57.0);
}

#[test]
fn test_toggle_independence() {
    let estimator = CostEstimator::default();

    let mut form = base_form();
    form.insert("include_dohdai".into(), "on".into());
    let only_dohdai = estimator.estimate(&form).unwrap();

    // 別のトグルを足しても既存費目の金額は変わらない
    form.insert("include_paint".into(), "on".into());
    let with_paint = estimator.estimate(&form).unwrap();

    assert_eq!(only_dohdai.dohdai_cost, with_paint.dohdai_cost);
    assert!(with_paint.paint_cost > 0.0);
    assert!(with_paint.raw_material_cost_total > only_dohdai.raw_material_cost_total);
}

#[test]
fn test_subtotals_are_additive() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    // 原材料・製造・販管の各カテゴリを横断して複数ON
    form.insert("include_dohdai".into(), "on".into());
    form.insert("include_drying_fuel".into(), "on".into());
    form.insert("include_main_firing_gas".into(), "on".into());
    form.insert("gas_unit_price".into(), "2".into());
    form.insert("kiln_count".into(), "100".into());
    form.insert("include_chumikin".into(), "on".into());
    form.insert("chumikin_unit".into(), "25".into());
    form.insert("include_seisojiken".into(), "on".into());
    form.insert("seisojiken_work".into(), "60".into());
    form.insert("include_nouhin_jinkenhi".into(), "on".into());
    form.insert("include_gasoline".into(), "on".into());

    let b = estimator.estimate(&form).unwrap();

    let raw_items = b.dohdai_cost
        + b.kata_cost
        + b.drying_fuel_cost
        + b.bisque_fuel_cost
        + b.hassui_cost
        + b.paint_cost
        + b.logo_copper_cost
        + b.glaze_material_cost
        + b.main_firing_gas_cost
        + b.transfer_sheet_cost;
    // 丸めは全フィールド一括なので1円未満の差しか生じない
    assert!((b.raw_material_cost_total - raw_items).abs() <= 1.0);

    let manufacturing_items = b.chumikin_cost
        + b.shiagechin_cost
        + b.haiimonochin_cost
        + b.seisojiken_cost
        + b.soyakeire_dashi_cost
        + b.soyakebarimono_cost
        + b.doban_hari_cost
        + b.hassui_kakouchin_cost
        + b.shiyu_hiyou_cost
        + b.shiyu_cost
        + b.kamairi_cost
        + b.kamadashi_cost
        + b.hamasuri_cost
        + b.kenpin_cost
        + b.print_kakouchin_cost;
    assert!((b.manufacturing_cost_total - (manufacturing_items + b.yield_coefficient)).abs() <= 1.0);

    // 総括の整合
    assert!(
        (b.production_cost_total - (b.raw_material_cost_total + b.manufacturing_cost_total)).abs()
            <= 1.0
    );
    assert!(
        (b.production_plus_sales - (b.production_cost_total + b.sales_admin_cost_total)).abs()
            <= 1.0
    );
    // 販管費 = (7500 + 750) ÷ 10個 = 825
    assert_eq!(b.sales_admin_cost_total, 825.0);
}

#[test]
fn test_ratios_are_finite_when_denominators_are_zero() {
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.insert("sales_price".into(), "0".into());
    form.insert("include_dohdai".into(), "on".into());

    let b = estimator.estimate(&form).unwrap();
    assert_eq!(b.raw_material_cost_ratio, 0.0);
    assert!(b.manufacturing_cost_ratio.is_finite());
    assert!(b.profit_ratio.is_finite());
}

#[test]
fn test_preview_and_confirm_agree() {
    // 同一フォームに対するプレビューと確定は同一内訳
    let estimator = CostEstimator::default();
    let mut form = base_form();
    form.insert("include_dohdai".into(), "on".into());
    form.insert("include_kamairi".into(), "on".into());
    form.insert("kamairi_time".into(), "2".into());
    form.insert("kiln_count".into(), "100".into());

    let preview = estimator.estimate(&form).unwrap();
    let confirmed = estimator.estimate(&form).unwrap();
    assert_eq!(preview, confirmed);
}
