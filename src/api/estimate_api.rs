// ==========================================
// 陶器製造原価見積システム - 見積API
// ==========================================
// 職責: プレビュー計算・確定保存・履歴照会・送信・プリセット
// フロー: プレビュー(calculate) → 確定(submit) → 送信(send_estimate)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{CostBreakdown, EstimateInput, EstimateRecord, FormMap};
use crate::engine::CostEstimator;
use crate::repository::EstimateRepository;

/// プリセット一覧の最大件数
pub const MAX_PRESET_ENTRIES: i64 = 10;

// ==========================================
// 返却用の集約型
// ==========================================

/// 状態別の見積履歴一式
#[derive(Debug, Clone)]
pub struct EstimateHistory {
    /// 作成済み（新しい順）
    pub active: Vec<EstimateRecord>,
    /// 送信済み（送信日時の新しい順）
    pub sent: Vec<EstimateRecord>,
    /// 削除済み（削除日時の新しい順）
    pub deleted: Vec<EstimateRecord>,
}

/// フォーム事前入力用のプリセット
#[derive(Debug, Clone)]
pub struct PresetEntry {
    /// 由来の見積レコードID
    pub id: i64,
    /// 表示名（例: "¥1,500 / 100個"）
    pub name: String,
    /// フォームへ転記する入力値
    pub input: EstimateInput,
}

// ==========================================
// EstimateApi - 見積の業務インターフェース
// ==========================================
pub struct EstimateApi {
    estimator: CostEstimator,
    repo: EstimateRepository,
}

impl EstimateApi {
    /// エンジンとリポジトリを束ねてAPIを構築する
    pub fn new(estimator: CostEstimator, repo: EstimateRepository) -> Self {
        Self { estimator, repo }
    }

    // ==========================================
    // 計算操作
    // ==========================================

    /// プレビュー計算（保存なし）
    pub fn calculate(&self, form: &FormMap) -> ApiResult<CostBreakdown> {
        let breakdown = self.estimator.estimate(form)?;
        Ok(breakdown)
    }

    /// 確定計算（計算して active として保存する）
    ///
    /// 同一フォームに対する calculate と同じ内訳を保存する。
    pub fn submit(&self, user_id: i64, form: &FormMap) -> ApiResult<EstimateRecord> {
        if user_id <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "ユーザIDが不正です: {user_id}"
            )));
        }

        let breakdown = self.estimator.estimate(form)?;
        let id = self.repo.insert(user_id, &breakdown)?;

        let record = self
            .repo
            .find_by_id(user_id, id)?
            .ok_or_else(|| ApiError::InternalError(format!("保存直後の見積が見つかりません: id={id}")))?;

        tracing::info!(user_id, id, "見積を確定保存");
        Ok(record)
    }

    // ==========================================
    // 履歴操作
    // ==========================================

    /// 状態別の履歴一式を取得する
    pub fn history(&self, user_id: i64) -> ApiResult<EstimateHistory> {
        Ok(EstimateHistory {
            active: self.repo.list_active(user_id)?,
            sent: self.repo.list_sent(user_id)?,
            deleted: self.repo.list_deleted(user_id)?,
        })
    }

    /// ID指定で1件取得する
    pub fn find_estimate(&self, user_id: i64, id: i64) -> ApiResult<EstimateRecord> {
        self.repo
            .find_by_id(user_id, id)?
            .ok_or_else(|| ApiError::NotFound(format!("Estimate (id={id})")))
    }

    /// 見積を論理削除する
    pub fn delete_estimate(&self, user_id: i64, id: i64) -> ApiResult<()> {
        self.repo.soft_delete(user_id, id)?;
        tracing::info!(user_id, id, "見積を削除");
        Ok(())
    }

    /// active な見積を送信済みへ遷移させ、遷移後のレコードを返す
    pub fn send_estimate(&self, user_id: i64, id: i64) -> ApiResult<EstimateRecord> {
        self.repo.mark_sent(user_id, id)?;
        tracing::info!(user_id, id, "見積を送信済みへ遷移");
        self.find_estimate(user_id, id)
    }

    // ==========================================
    // プリセット操作
    // ==========================================

    /// 最新の active 見積からプリセット一覧を組み立てる
    ///
    /// 表示名は「¥売価 / 発注数個」（3桁区切り）。
    pub fn list_presets(&self, user_id: i64) -> ApiResult<Vec<PresetEntry>> {
        let records = self.repo.list_recent_active(user_id, MAX_PRESET_ENTRIES)?;

        let presets = records
            .iter()
            .map(|record| {
                let input = record.breakdown.to_input();
                let name = format!(
                    "¥{} / {}個",
                    format_thousands(input.sales_price),
                    format_thousands(input.order_quantity as f64),
                );
                PresetEntry {
                    id: record.id,
                    name,
                    input,
                }
            })
            .collect();

        Ok(presets)
    }
}

/// 整数部を3桁区切りで整形する（表示名用。小数部は切り捨て）
fn format_thousands(value: f64) -> String {
    let integral = value.trunc() as i64;
    let digits = integral.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if integral < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
