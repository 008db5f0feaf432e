//! 유동성 풀 스냅샷 저장.

use super::SnapshotStore;
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::FromRow;
use tracing::instrument;

/// 유동성 풀 스냅샷 레코드.
#[derive(Debug, Clone, FromRow)]
pub struct YieldPoolRecord {
    pub pool_id: String,
    pub chain: Option<String>,
    pub project: Option<String>,
    pub symbol: Option<String>,
    pub tvl_usd: Option<f64>,
    pub apy: Option<f64>,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub volume_usd_1d: Option<f64>,
    /// 스테이블코인 풀 여부 (0/1로 저장)
    pub stablecoin: bool,
}

impl SnapshotStore {
    /// 유동성 풀 스냅샷 일괄 저장.
    ///
    /// 단일 트랜잭션으로 실행되며, (date, pool_id) 충돌 시
    /// 키 외 전체 컬럼을 덮어씁니다.
    #[instrument(skip(self, records), fields(date = %date, count = records.len()))]
    pub async fn save_yield_pools(
        &self,
        date: NaiveDate,
        records: &[YieldPoolRecord],
    ) -> Result<usize> {
        let mut tx = self.pool().begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO yield_pools
                    (date, pool_id, chain, project, symbol, tvl_usd,
                     apy, apy_base, apy_reward, volume_usd_1d, stablecoin)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (date, pool_id) DO UPDATE SET
                    chain = excluded.chain,
                    project = excluded.project,
                    symbol = excluded.symbol,
                    tvl_usd = excluded.tvl_usd,
                    apy = excluded.apy,
                    apy_base = excluded.apy_base,
                    apy_reward = excluded.apy_reward,
                    volume_usd_1d = excluded.volume_usd_1d,
                    stablecoin = excluded.stablecoin
                "#,
            )
            .bind(date)
            .bind(&record.pool_id)
            .bind(&record.chain)
            .bind(&record.project)
            .bind(&record.symbol)
            .bind(record.tvl_usd)
            .bind(record.apy)
            .bind(record.apy_base)
            .bind(record.apy_reward)
            .bind(record.volume_usd_1d)
            .bind(record.stablecoin)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(records.len())
    }

    /// 특정 날짜의 풀 스냅샷 조회 (APY 내림차순).
    pub async fn get_yield_pools(&self, date: NaiveDate) -> Result<Vec<YieldPoolRecord>> {
        let records = sqlx::query_as(
            r#"
            SELECT pool_id, chain, project, symbol, tvl_usd,
                   apy, apy_base, apy_reward, volume_usd_1d, stablecoin
            FROM yield_pools
            WHERE date = ?
            ORDER BY apy DESC
            "#,
        )
        .bind(date)
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }
}
