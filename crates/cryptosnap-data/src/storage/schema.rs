//! 스키마 초기화.
//!
//! 네 개의 스냅샷 테이블을 멱등하게 생성합니다. 스키마는 버전 간
//! 추가 전용입니다: 새 테이블이 추가될 수는 있어도 기존 테이블을
//! 변경하거나 삭제하지 않으므로, 이전 버전이 만든 데이터베이스에
//! 대해 실행해도 안전합니다.

use super::SnapshotStore;
use crate::error::Result;

impl SnapshotStore {
    /// 전체 테이블 생성 (멱등).
    ///
    /// 매 실행 시 호출해도 부작용이 없습니다.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS coin_snapshots (
                date TEXT NOT NULL,
                coin_id TEXT NOT NULL,
                symbol TEXT,
                name TEXT,
                current_price REAL,
                market_cap REAL,
                total_volume REAL,
                price_change_24h REAL,
                price_change_pct_24h REAL,
                price_change_pct_7d REAL,
                price_change_pct_30d REAL,
                ath REAL,
                ath_date TEXT,
                last_updated TEXT,
                PRIMARY KEY (date, coin_id)
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS global_metrics (
                date TEXT PRIMARY KEY,
                total_market_cap_usd REAL,
                total_volume_usd REAL,
                btc_dominance REAL
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS yield_pools (
                date TEXT NOT NULL,
                pool_id TEXT NOT NULL,
                chain TEXT,
                project TEXT,
                symbol TEXT,
                tvl_usd REAL,
                apy REAL,
                apy_base REAL,
                apy_reward REAL,
                volume_usd_1d REAL,
                stablecoin INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (date, pool_id)
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS nft_collections (
                date TEXT NOT NULL,
                slug TEXT NOT NULL,
                name TEXT,
                floor_price_eth REAL,
                floor_price_usd REAL,
                volume_1d_eth REAL,
                volume_1d_usd REAL,
                sales_1d INTEGER,
                average_price_1d REAL,
                total_supply INTEGER,
                num_owners INTEGER,
                PRIMARY KEY (date, slug)
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        tracing::debug!("스키마 초기화 완료");

        Ok(())
    }
}
