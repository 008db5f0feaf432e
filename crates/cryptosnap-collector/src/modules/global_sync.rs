//! 글로벌 시장 지표 수집 모듈.

use crate::{CollectionStats, Result};
use chrono::NaiveDate;
use cryptosnap_data::provider::CoinGeckoClient;
use cryptosnap_data::storage::GlobalMetricsRecord;
use cryptosnap_data::SnapshotStore;
use std::time::Instant;

/// 글로벌 시장 지표 수집. 실행당 정확히 한 행을 저장합니다.
pub async fn sync_global(
    store: &SnapshotStore,
    client: &CoinGeckoClient,
    date: NaiveDate,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(date = %date, "글로벌 지표 수집 시작");

    let global = client.fetch_global().await?;

    let record = GlobalMetricsRecord {
        total_market_cap_usd: global.total_market_cap.usd,
        total_volume_usd: global.total_volume.usd,
        btc_dominance: global.btc_dominance,
    };

    store.save_global_metrics(date, &record).await?;
    stats.records = 1;

    stats.elapsed = start.elapsed();
    tracing::info!(
        total_market_cap_usd = ?record.total_market_cap_usd,
        btc_dominance = ?record.btc_dominance,
        "글로벌 지표 저장 완료"
    );

    Ok(stats)
}
