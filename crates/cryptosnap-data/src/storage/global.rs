//! 글로벌 지표 저장.

use super::SnapshotStore;
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::FromRow;
use tracing::instrument;

/// 글로벌 시장 지표 레코드. 날짜당 한 행.
#[derive(Debug, Clone, FromRow)]
pub struct GlobalMetricsRecord {
    pub total_market_cap_usd: Option<f64>,
    pub total_volume_usd: Option<f64>,
    pub btc_dominance: Option<f64>,
}

impl SnapshotStore {
    /// 글로벌 지표 저장. 같은 날짜에 다시 쓰면 덮어씁니다.
    #[instrument(skip(self, record), fields(date = %date))]
    pub async fn save_global_metrics(
        &self,
        date: NaiveDate,
        record: &GlobalMetricsRecord,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO global_metrics
                (date, total_market_cap_usd, total_volume_usd, btc_dominance)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (date) DO UPDATE SET
                total_market_cap_usd = excluded.total_market_cap_usd,
                total_volume_usd = excluded.total_volume_usd,
                btc_dominance = excluded.btc_dominance
            "#,
        )
        .bind(date)
        .bind(record.total_market_cap_usd)
        .bind(record.total_volume_usd)
        .bind(record.btc_dominance)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// 특정 날짜의 글로벌 지표 조회.
    pub async fn get_global_metrics(&self, date: NaiveDate) -> Result<Option<GlobalMetricsRecord>> {
        let record = sqlx::query_as(
            r#"
            SELECT total_market_cap_usd, total_volume_usd, btc_dominance
            FROM global_metrics
            WHERE date = ?
            "#,
        )
        .bind(date)
        .fetch_optional(self.pool())
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_row_per_date() {
        let store = SnapshotStore::in_memory().await.unwrap();
        store.init_schema().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        store
            .save_global_metrics(
                date,
                &GlobalMetricsRecord {
                    total_market_cap_usd: Some(2.3e12),
                    total_volume_usd: Some(9.8e10),
                    btc_dominance: Some(54.3),
                },
            )
            .await
            .unwrap();

        store
            .save_global_metrics(
                date,
                &GlobalMetricsRecord {
                    total_market_cap_usd: Some(2.4e12),
                    total_volume_usd: None,
                    btc_dominance: Some(54.9),
                },
            )
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM global_metrics")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);

        let record = store.get_global_metrics(date).await.unwrap().unwrap();
        assert_eq!(record.total_market_cap_usd, Some(2.4e12));
        assert!(record.total_volume_usd.is_none());
    }
}
