//! DeFi 유동성 풀 수집 모듈.

use crate::{CollectionStats, Result};
use chrono::NaiveDate;
use cryptosnap_data::provider::{DefiLlamaClient, PoolInfo};
use cryptosnap_data::storage::YieldPoolRecord;
use cryptosnap_data::SnapshotStore;
use std::cmp::Ordering;
use std::time::Instant;

/// 유지할 풀 수 (APY 내림차순 상위)
const MAX_POOLS: usize = 250;

/// 유동성 풀 스냅샷 수집
///
/// 전체 풀 목록을 조회한 뒤 APY 내림차순으로 정렬하여
/// 상위 250개만 저장합니다. 순위는 실행마다 다시 계산됩니다.
pub async fn sync_yields(
    store: &SnapshotStore,
    client: &DefiLlamaClient,
    date: NaiveDate,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(date = %date, "유동성 풀 수집 시작");

    let pools = client.fetch_pools().await?;
    tracing::debug!(count = pools.len(), "전체 풀 목록 조회 완료");

    let top = top_pools_by_apy(pools, MAX_POOLS);
    let records: Vec<YieldPoolRecord> = top.into_iter().map(to_record).collect();

    stats.records = store.save_yield_pools(date, &records).await?;

    stats.elapsed = start.elapsed();
    tracing::info!(count = stats.records, "유동성 풀 저장 완료");

    Ok(stats)
}

/// APY 내림차순 상위 `limit`개 선별.
///
/// 안정 정렬이므로 APY가 같은 풀은 업스트림 순서를 유지하며,
/// APY가 없는 풀은 맨 뒤로 밀립니다.
fn top_pools_by_apy(mut pools: Vec<PoolInfo>, limit: usize) -> Vec<PoolInfo> {
    pools.sort_by(|a, b| match (a.apy, b.apy) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    pools.truncate(limit);
    pools
}

/// API 응답을 저장 레코드로 변환.
fn to_record(pool: PoolInfo) -> YieldPoolRecord {
    YieldPoolRecord {
        pool_id: pool.pool,
        chain: pool.chain,
        project: pool.project,
        symbol: pool.symbol,
        tvl_usd: pool.tvl_usd,
        apy: pool.apy,
        apy_base: pool.apy_base,
        apy_reward: pool.apy_reward,
        volume_usd_1d: pool.volume_usd_1d,
        stablecoin: pool.stablecoin,
    }
}
