// ==========================================
// 陶器製造原価見積システム - コマンドラインエントリ
// ==========================================
// 用法: ceramic-estimate <form.json> [--save <user_id>]
// - form.json: 項目名 → 値 のフォームマップ（値は文字列/数値/真偽）
// - --save: 計算結果をローカルDBに active として保存する
// ==========================================

use anyhow::{bail, Context, Result};
use ceramic_estimate::db;
use ceramic_estimate::domain::FormMap;
use ceramic_estimate::repository::EstimateRepository;
use ceramic_estimate::{logging, CostEstimator, APP_NAME, VERSION};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn main() -> Result<()> {
    logging::init();
    tracing::info!(version = VERSION, "{} 起動", APP_NAME);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (form_path, save_user_id) = parse_args(&args)?;

    let form = load_form(&form_path)?;

    let estimator = CostEstimator::default();
    let breakdown = estimator
        .estimate(&form)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&breakdown).context("内訳のJSON整形に失敗しました")?
    );

    if let Some(user_id) = save_user_id {
        let db_path = default_db_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("データディレクトリの作成に失敗しました: {}", parent.display()))?;
        }

        let conn = db::open_sqlite_connection(&db_path)
            .with_context(|| format!("データベースを開けません: {}", db_path.display()))?;
        db::init_schema(&conn).context("スキーマ初期化に失敗しました")?;

        let repo = EstimateRepository::new(Arc::new(Mutex::new(conn)));
        let id = repo
            .insert(user_id, &breakdown)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        tracing::info!(user_id, id, db = %db_path.display(), "見積を保存");
        eprintln!("保存しました: id={id} ({})", db_path.display());
    }

    Ok(())
}

/// 引数解析: <form.json> [--save <user_id>]
fn parse_args(args: &[String]) -> Result<(PathBuf, Option<i64>)> {
    let mut form_path: Option<PathBuf> = None;
    let mut save_user_id: Option<i64> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--save" => {
                let raw = iter
                    .next()
                    .context("--save にはユーザIDが必要です")?;
                let user_id: i64 = raw
                    .parse()
                    .with_context(|| format!("ユーザIDが数値ではありません: {raw}"))?;
                save_user_id = Some(user_id);
            }
            other if form_path.is_none() => form_path = Some(PathBuf::from(other)),
            other => bail!("不明な引数です: {other}"),
        }
    }

    let form_path = form_path.context("用法: ceramic-estimate <form.json> [--save <user_id>]")?;
    Ok((form_path, save_user_id))
}

/// フォームJSONを読み込み、値を文字列に正規化する
///
/// トグル項目は true のキーのみ採用する（false は未指定と同義）。
fn load_form(path: &PathBuf) -> Result<FormMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("フォームファイルを読めません: {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("フォームJSONの解析に失敗しました")?;

    let object = value
        .as_object()
        .context("フォームJSONはオブジェクトである必要があります")?;

    let mut form = FormMap::new();
    for (key, val) in object {
        match val {
            serde_json::Value::String(s) => {
                form.insert(key.clone(), s.clone());
            }
            serde_json::Value::Number(n) => {
                form.insert(key.clone(), n.to_string());
            }
            serde_json::Value::Bool(true) => {
                form.insert(key.clone(), "on".to_string());
            }
            serde_json::Value::Bool(false) | serde_json::Value::Null => {}
            other => bail!("フォーム項目 {key} の値が不正です: {other}"),
        }
    }
    Ok(form)
}

/// 保存先DBの既定パス
fn default_db_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("データディレクトリを特定できません")?;
    Ok(base.join("ceramic-estimate").join("estimates.db"))
}
