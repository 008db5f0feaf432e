//! NFT 컬렉션 스냅샷 저장.

use super::SnapshotStore;
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::FromRow;
use tracing::instrument;

/// NFT 컬렉션 스냅샷 레코드.
///
/// 업스트림 `stats`가 null인 컬렉션은 통계 필드 전체가 NULL로 저장됩니다.
#[derive(Debug, Clone, FromRow)]
pub struct NftCollectionRecord {
    pub slug: String,
    pub name: Option<String>,
    pub floor_price_eth: Option<f64>,
    pub floor_price_usd: Option<f64>,
    pub volume_1d_eth: Option<f64>,
    pub volume_1d_usd: Option<f64>,
    pub sales_1d: Option<i64>,
    pub average_price_1d: Option<f64>,
    pub total_supply: Option<i64>,
    pub num_owners: Option<i64>,
}

impl SnapshotStore {
    /// NFT 컬렉션 스냅샷 일괄 저장.
    ///
    /// 단일 트랜잭션으로 실행되며, (date, slug) 충돌 시
    /// 키 외 전체 컬럼을 덮어씁니다.
    #[instrument(skip(self, records), fields(date = %date, count = records.len()))]
    pub async fn save_nft_collections(
        &self,
        date: NaiveDate,
        records: &[NftCollectionRecord],
    ) -> Result<usize> {
        let mut tx = self.pool().begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO nft_collections
                    (date, slug, name, floor_price_eth, floor_price_usd,
                     volume_1d_eth, volume_1d_usd, sales_1d, average_price_1d,
                     total_supply, num_owners)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (date, slug) DO UPDATE SET
                    name = excluded.name,
                    floor_price_eth = excluded.floor_price_eth,
                    floor_price_usd = excluded.floor_price_usd,
                    volume_1d_eth = excluded.volume_1d_eth,
                    volume_1d_usd = excluded.volume_1d_usd,
                    sales_1d = excluded.sales_1d,
                    average_price_1d = excluded.average_price_1d,
                    total_supply = excluded.total_supply,
                    num_owners = excluded.num_owners
                "#,
            )
            .bind(date)
            .bind(&record.slug)
            .bind(&record.name)
            .bind(record.floor_price_eth)
            .bind(record.floor_price_usd)
            .bind(record.volume_1d_eth)
            .bind(record.volume_1d_usd)
            .bind(record.sales_1d)
            .bind(record.average_price_1d)
            .bind(record.total_supply)
            .bind(record.num_owners)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(records.len())
    }

    /// 특정 날짜의 NFT 컬렉션 스냅샷 조회.
    pub async fn get_nft_collections(&self, date: NaiveDate) -> Result<Vec<NftCollectionRecord>> {
        let records = sqlx::query_as(
            r#"
            SELECT slug, name, floor_price_eth, floor_price_usd,
                   volume_1d_eth, volume_1d_usd, sales_1d, average_price_1d,
                   total_supply, num_owners
            FROM nft_collections
            WHERE date = ?
            ORDER BY slug
            "#,
        )
        .bind(date)
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_stats_record() {
        let store = SnapshotStore::in_memory().await.unwrap();
        store.init_schema().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let record = NftCollectionRecord {
            slug: "ghost-collection".to_string(),
            name: Some("Ghost".to_string()),
            floor_price_eth: None,
            floor_price_usd: None,
            volume_1d_eth: None,
            volume_1d_usd: None,
            sales_1d: None,
            average_price_1d: None,
            total_supply: None,
            num_owners: None,
        };

        store.save_nft_collections(date, &[record]).await.unwrap();

        let records = store.get_nft_collections(date).await.unwrap();
        assert_eq!(records.len(), 1);
        // slug/name은 채워지고 통계 필드는 전부 NULL
        assert_eq!(records[0].slug, "ghost-collection");
        assert_eq!(records[0].name.as_deref(), Some("Ghost"));
        assert!(records[0].floor_price_eth.is_none());
        assert!(records[0].num_owners.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_same_slug() {
        let store = SnapshotStore::in_memory().await.unwrap();
        store.init_schema().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let mut record = NftCollectionRecord {
            slug: "boredapeyachtclub".to_string(),
            name: Some("Bored Ape Yacht Club".to_string()),
            floor_price_eth: Some(12.5),
            floor_price_usd: Some(43000.0),
            volume_1d_eth: Some(310.2),
            volume_1d_usd: Some(1.07e6),
            sales_1d: Some(25),
            average_price_1d: Some(12.4),
            total_supply: Some(10000),
            num_owners: Some(5500),
        };

        store
            .save_nft_collections(date, std::slice::from_ref(&record))
            .await
            .unwrap();

        record.floor_price_eth = Some(13.1);
        store
            .save_nft_collections(date, std::slice::from_ref(&record))
            .await
            .unwrap();

        let records = store.get_nft_collections(date).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].floor_price_eth, Some(13.1));
    }
}
