//! 코인 스냅샷 저장.

use super::SnapshotStore;
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::FromRow;
use tracing::instrument;

/// 코인 스냅샷 레코드.
///
/// `coin_id`를 제외한 모든 필드는 NULL일 수 있습니다.
#[derive(Debug, Clone, FromRow)]
pub struct CoinSnapshotRecord {
    pub coin_id: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_pct_24h: Option<f64>,
    pub price_change_pct_7d: Option<f64>,
    pub price_change_pct_30d: Option<f64>,
    pub ath: Option<f64>,
    pub ath_date: Option<String>,
    pub last_updated: Option<String>,
}

impl SnapshotStore {
    /// 코인 스냅샷 일괄 저장.
    ///
    /// 단일 트랜잭션으로 실행되며, (date, coin_id) 충돌 시
    /// 키 외 전체 컬럼을 덮어씁니다.
    #[instrument(skip(self, records), fields(date = %date, count = records.len()))]
    pub async fn save_coin_snapshots(
        &self,
        date: NaiveDate,
        records: &[CoinSnapshotRecord],
    ) -> Result<usize> {
        let mut tx = self.pool().begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO coin_snapshots
                    (date, coin_id, symbol, name, current_price, market_cap, total_volume,
                     price_change_24h, price_change_pct_24h, price_change_pct_7d,
                     price_change_pct_30d, ath, ath_date, last_updated)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (date, coin_id) DO UPDATE SET
                    symbol = excluded.symbol,
                    name = excluded.name,
                    current_price = excluded.current_price,
                    market_cap = excluded.market_cap,
                    total_volume = excluded.total_volume,
                    price_change_24h = excluded.price_change_24h,
                    price_change_pct_24h = excluded.price_change_pct_24h,
                    price_change_pct_7d = excluded.price_change_pct_7d,
                    price_change_pct_30d = excluded.price_change_pct_30d,
                    ath = excluded.ath,
                    ath_date = excluded.ath_date,
                    last_updated = excluded.last_updated
                "#,
            )
            .bind(date)
            .bind(&record.coin_id)
            .bind(&record.symbol)
            .bind(&record.name)
            .bind(record.current_price)
            .bind(record.market_cap)
            .bind(record.total_volume)
            .bind(record.price_change_24h)
            .bind(record.price_change_pct_24h)
            .bind(record.price_change_pct_7d)
            .bind(record.price_change_pct_30d)
            .bind(record.ath)
            .bind(&record.ath_date)
            .bind(&record.last_updated)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(records.len())
    }

    /// 특정 날짜의 코인 스냅샷 조회.
    pub async fn get_coin_snapshots(&self, date: NaiveDate) -> Result<Vec<CoinSnapshotRecord>> {
        let records = sqlx::query_as(
            r#"
            SELECT coin_id, symbol, name, current_price, market_cap, total_volume,
                   price_change_24h, price_change_pct_24h, price_change_pct_7d,
                   price_change_pct_30d, ath, ath_date, last_updated
            FROM coin_snapshots
            WHERE date = ?
            ORDER BY coin_id
            "#,
        )
        .bind(date)
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }
}
