//! 코인 시장 스냅샷 수집 모듈.

use crate::{CollectionStats, Result};
use chrono::NaiveDate;
use cryptosnap_data::provider::{CoinGeckoClient, MarketCoin};
use cryptosnap_data::storage::CoinSnapshotRecord;
use cryptosnap_data::SnapshotStore;
use std::time::Instant;

/// 코인 시장 스냅샷 수집
///
/// 시가총액 상위 250개 코인을 조회하여 해당 날짜의 행으로 저장합니다.
/// HTTP 실패 시 아무 행도 커밋하지 않고 오류를 반환합니다.
pub async fn sync_coins(
    store: &SnapshotStore,
    client: &CoinGeckoClient,
    date: NaiveDate,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(date = %date, "코인 스냅샷 수집 시작");

    let coins = client.fetch_markets().await?;
    tracing::debug!(count = coins.len(), "코인 시장 데이터 조회 완료");

    let records: Vec<CoinSnapshotRecord> = coins.into_iter().map(to_record).collect();
    stats.records = store.save_coin_snapshots(date, &records).await?;

    stats.elapsed = start.elapsed();
    tracing::info!(count = stats.records, "코인 스냅샷 저장 완료");

    Ok(stats)
}

/// API 응답을 저장 레코드로 변환. 누락 필드는 NULL로 저장됩니다.
fn to_record(coin: MarketCoin) -> CoinSnapshotRecord {
    CoinSnapshotRecord {
        coin_id: coin.id,
        symbol: coin.symbol,
        name: coin.name,
        current_price: coin.current_price,
        market_cap: coin.market_cap,
        total_volume: coin.total_volume,
        price_change_24h: coin.price_change_24h,
        price_change_pct_24h: coin.price_change_percentage_24h,
        price_change_pct_7d: coin.price_change_percentage_7d_in_currency,
        price_change_pct_30d: coin.price_change_percentage_30d_in_currency,
        ath: coin.ath,
        ath_date: coin.ath_date,
        last_updated: coin.last_updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_record_maps_percentage_fields() {
        let coin = MarketCoin {
            id: "ethereum".to_string(),
            symbol: Some("eth".to_string()),
            name: Some("Ethereum".to_string()),
            current_price: Some(3400.0),
            market_cap: Some(4.0e11),
            total_volume: Some(1.5e10),
            price_change_24h: Some(12.0),
            price_change_percentage_24h: Some(0.35),
            price_change_percentage_7d_in_currency: Some(-2.1),
            price_change_percentage_30d_in_currency: Some(7.9),
            ath: Some(4878.0),
            ath_date: Some("2021-11-10T14:24:19.604Z".to_string()),
            last_updated: Some("2024-06-01T00:00:00.000Z".to_string()),
        };

        let record = to_record(coin);

        assert_eq!(record.coin_id, "ethereum");
        assert_eq!(record.price_change_pct_24h, Some(0.35));
        assert_eq!(record.price_change_pct_7d, Some(-2.1));
        assert_eq!(record.price_change_pct_30d, Some(7.9));
    }
}
