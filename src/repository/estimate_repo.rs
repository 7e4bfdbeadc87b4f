// ==========================================
// 陶器製造原価見積システム - 見積履歴リポジトリ
// ==========================================
// 職責: 原価内訳の不透明な永続化と保持件数ルールの適用
// 保持ルール:
// - active はユーザごとに最大3件（超過時は最古を論理削除）
// - deleted はユーザごとに最大30件（超過分は最古から物理削除）
// ==========================================

use crate::domain::{CostBreakdown, EstimateRecord, EstimateStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult, Row, Transaction};
use std::sync::{Arc, Mutex};

/// active 状態の最大保持件数
pub const MAX_ACTIVE_ESTIMATES: i64 = 3;

/// deleted 状態の最大保持件数
pub const MAX_DELETED_ESTIMATES: i64 = 30;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// EstimateRepository - 見積履歴リポジトリ
// ==========================================
pub struct EstimateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EstimateRepository {
    /// 新しい見積履歴リポジトリを作成する
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// データベース接続を取得する
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 書き込み操作
    // ==========================================

    /// 見積を active として登録する
    ///
    /// active が既に3件ある場合は最古の1件を論理削除してから登録する。
    /// 論理削除が30件を超えた分は最古から物理削除する。
    ///
    /// # 返り値
    /// - `Ok(id)`: 登録されたレコードID
    pub fn insert(&self, user_id: i64, breakdown: &CostBreakdown) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let active_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM estimates WHERE user_id = ?1 AND status = 'active'",
            params![user_id],
            |row| row.get(0),
        )?;

        if active_count >= MAX_ACTIVE_ESTIMATES {
            tx.execute(
                r#"
                UPDATE estimates
                   SET status = 'deleted', deleted_at = ?1
                 WHERE id = (
                     SELECT id FROM estimates
                      WHERE user_id = ?2 AND status = 'active'
                      ORDER BY created_at ASC, id ASC
                      LIMIT 1
                 )
                "#,
                params![now_str(), user_id],
            )?;
            Self::purge_excess_deleted(&tx, user_id)?;
        }

        let payload = serde_json::to_string(breakdown)
            .map_err(|e| RepositoryError::ValidationError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO estimates (user_id, estimate_data, status, created_at, sent_at, deleted_at)
            VALUES (?1, ?2, 'active', ?3, NULL, NULL)
            "#,
            params![user_id, payload, now_str()],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!(user_id, id, "見積を登録");
        Ok(id)
    }

    /// 見積を論理削除する
    ///
    /// 削除後、deleted の保持上限を超えた分は最古から物理削除する。
    pub fn soft_delete(&self, user_id: i64, id: i64) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let rows = tx.execute(
            r#"
            UPDATE estimates
               SET status = 'deleted', deleted_at = ?1
             WHERE id = ?2 AND user_id = ?3 AND status != 'deleted'
            "#,
            params![now_str(), id, user_id],
        )?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Estimate".to_string(),
                id: id.to_string(),
            });
        }

        Self::purge_excess_deleted(&tx, user_id)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// active な見積を sent に遷移させる
    ///
    /// active 以外（送信済み・削除済み）は対象外として NotFound を返す。
    pub fn mark_sent(&self, user_id: i64, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE estimates
               SET status = 'sent', sent_at = ?1
             WHERE id = ?2 AND user_id = ?3 AND status = 'active'
            "#,
            params![now_str(), id, user_id],
        )?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Estimate".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// deleted の保持上限超過分を最古から物理削除する
    fn purge_excess_deleted(tx: &Transaction<'_>, user_id: i64) -> RepositoryResult<()> {
        let deleted_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM estimates WHERE user_id = ?1 AND status = 'deleted'",
            params![user_id],
            |row| row.get(0),
        )?;

        let excess = deleted_count - MAX_DELETED_ESTIMATES;
        if excess > 0 {
            tx.execute(
                r#"
                DELETE FROM estimates
                 WHERE id IN (
                     SELECT id FROM estimates
                      WHERE user_id = ?1 AND status = 'deleted'
                      ORDER BY deleted_at ASC, id ASC
                      LIMIT ?2
                 )
                "#,
                params![user_id, excess],
            )?;
            tracing::debug!(user_id, excess, "削除済み見積の超過分を物理削除");
        }
        Ok(())
    }

    // ==========================================
    // 検索操作
    // ==========================================

    /// ID指定で1件取得する
    pub fn find_by_id(&self, user_id: i64, id: i64) -> RepositoryResult<Option<EstimateRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, estimate_data, status, created_at, sent_at, deleted_at
              FROM estimates
             WHERE id = ?1 AND user_id = ?2
            "#,
        )?;

        match stmt.query_row(params![id, user_id], map_row) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// active 一覧（作成日時の新しい順）
    pub fn list_active(&self, user_id: i64) -> RepositoryResult<Vec<EstimateRecord>> {
        self.list_by_status(user_id, EstimateStatus::Active, "created_at")
    }

    /// deleted 一覧（削除日時の新しい順）
    pub fn list_deleted(&self, user_id: i64) -> RepositoryResult<Vec<EstimateRecord>> {
        self.list_by_status(user_id, EstimateStatus::Deleted, "deleted_at")
    }

    /// sent 一覧（送信日時の新しい順）
    pub fn list_sent(&self, user_id: i64) -> RepositoryResult<Vec<EstimateRecord>> {
        self.list_by_status(user_id, EstimateStatus::Sent, "sent_at")
    }

    /// 状態別の一覧取得
    ///
    /// order_column は内部の固定値のみ（外部入力を渡さないこと）。
    fn list_by_status(
        &self,
        user_id: i64,
        status: EstimateStatus,
        order_column: &str,
    ) -> RepositoryResult<Vec<EstimateRecord>> {
        let conn = self.get_conn()?;

        let sql = format!(
            r#"
            SELECT id, user_id, estimate_data, status, created_at, sent_at, deleted_at
              FROM estimates
             WHERE user_id = ?1 AND status = ?2
             ORDER BY {order_column} DESC, id DESC
            "#,
        );
        let mut stmt = conn.prepare(&sql)?;

        let records = stmt
            .query_map(params![user_id, status.as_str()], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 最新の active をプリセット候補として返す（最大 limit 件）
    pub fn list_recent_active(
        &self,
        user_id: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<EstimateRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, estimate_data, status, created_at, sent_at, deleted_at
              FROM estimates
             WHERE user_id = ?1 AND status = 'active'
             ORDER BY created_at DESC, id DESC
             LIMIT ?2
            "#,
        )?;

        let records = stmt
            .query_map(params![user_id, limit], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 状態別の件数
    pub fn count_by_status(
        &self,
        user_id: i64,
        status: EstimateStatus,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM estimates WHERE user_id = ?1 AND status = ?2",
            params![user_id, status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

// ==========================================
// 補助関数
// ==========================================

/// 現在時刻のDB格納文字列
fn now_str() -> String {
    Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

/// データベース行を EstimateRecord にマッピングする
fn map_row(row: &Row<'_>) -> SqliteResult<EstimateRecord> {
    let id: i64 = row.get(0)?;
    let user_id: i64 = row.get(1)?;
    let payload: String = row.get(2)?;
    let status_str: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;
    let sent_at_str: Option<String> = row.get(5)?;
    let deleted_at_str: Option<String> = row.get(6)?;

    let breakdown: CostBreakdown = serde_json::from_str(&payload).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let status = EstimateStatus::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("不明な status: {status_str}").into(),
        )
    })?;

    let created_at = parse_timestamp(&created_at_str, 4)?;
    let sent_at = sent_at_str.as_deref().map(|s| parse_timestamp(s, 5)).transpose()?;
    let deleted_at = deleted_at_str
        .as_deref()
        .map(|s| parse_timestamp(s, 6))
        .transpose()?;

    Ok(EstimateRecord {
        id,
        user_id,
        breakdown,
        status,
        created_at,
        sent_at,
        deleted_at,
    })
}

/// タイムスタンプ文字列の復元
fn parse_timestamp(s: &str, column: usize) -> SqliteResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
