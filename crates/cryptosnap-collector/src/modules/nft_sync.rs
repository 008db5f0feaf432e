//! NFT 컬렉션 수집 모듈.

use crate::{CollectionStats, Result};
use chrono::NaiveDate;
use cryptosnap_data::provider::{CollectionInfo, OpenSeaClient};
use cryptosnap_data::storage::NftCollectionRecord;
use cryptosnap_data::SnapshotStore;
use std::time::Instant;

/// NFT 컬렉션 스냅샷 수집
///
/// 이더리움 체인에서 1일 거래량 상위 100개 컬렉션을 저장합니다.
/// `stats`가 null인 컬렉션도 slug/name만 채워 저장하며
/// 전체 수집을 실패시키지 않습니다.
pub async fn sync_nfts(
    store: &SnapshotStore,
    client: &OpenSeaClient,
    date: NaiveDate,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(date = %date, "NFT 컬렉션 수집 시작");

    let collections = client.fetch_top_collections().await?;
    tracing::debug!(count = collections.len(), "컬렉션 목록 조회 완료");

    let records: Vec<NftCollectionRecord> = collections.into_iter().map(to_record).collect();
    stats.records = store.save_nft_collections(date, &records).await?;

    stats.elapsed = start.elapsed();
    tracing::info!(count = stats.records, "NFT 컬렉션 저장 완료");

    Ok(stats)
}

/// API 응답을 저장 레코드로 변환.
///
/// `stats`가 없으면 통계 필드 전체를 NULL로 둡니다.
fn to_record(collection: CollectionInfo) -> NftCollectionRecord {
    let stats = collection.stats;

    NftCollectionRecord {
        slug: collection.slug,
        name: collection.name,
        floor_price_eth: stats.as_ref().and_then(|s| s.floor_price),
        floor_price_usd: stats.as_ref().and_then(|s| s.floor_price_usd),
        volume_1d_eth: stats.as_ref().and_then(|s| s.one_day_volume),
        volume_1d_usd: stats.as_ref().and_then(|s| s.one_day_volume_usd),
        sales_1d: stats.as_ref().and_then(|s| s.one_day_sales.map(|v| v as i64)),
        average_price_1d: stats.as_ref().and_then(|s| s.one_day_average_price),
        total_supply: stats.as_ref().and_then(|s| s.total_supply.map(|v| v as i64)),
        num_owners: stats.as_ref().and_then(|s| s.num_owners),
    }
}
