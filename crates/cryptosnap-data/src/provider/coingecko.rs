//! CoinGecko API 클라이언트.
//!
//! 코인 시장 데이터와 글로벌 시장 지표를 수집합니다.
//!
//! # 지원 데이터
//!
//! - 코인 시장 스냅샷 (시가총액 상위 250개, USD 기준)
//! - 글로벌 지표 (총 시가총액, 총 거래량, BTC 도미넌스)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use cryptosnap_data::provider::CoinGeckoClient;
//!
//! let client = CoinGeckoClient::new();
//! let coins = client.fetch_markets().await?;
//! let global = client.fetch_global().await?;
//! ```

use crate::error::{DataError, Result};
use serde::Deserialize;
use std::time::Duration;

/// 대량 엔드포인트 요청 타임아웃 (초)
const BULK_TIMEOUT_SECS: u64 = 30;
/// 글로벌 지표 요청 타임아웃 (초)
const GLOBAL_TIMEOUT_SECS: u64 = 15;

/// CoinGecko API 클라이언트.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

/// 코인 시장 데이터.
///
/// `id`를 제외한 모든 필드는 응답에서 누락될 수 있으며,
/// 누락 시 `None`으로 저장됩니다 (수집 중단 없음).
#[derive(Debug, Clone, Deserialize)]
pub struct MarketCoin {
    /// 코인 식별자 (엔티티 키, 항상 존재)
    pub id: String,
    /// 심볼 (예: "btc")
    pub symbol: Option<String>,
    /// 코인명
    pub name: Option<String>,
    /// 현재가 (USD)
    pub current_price: Option<f64>,
    /// 시가총액 (USD)
    pub market_cap: Option<f64>,
    /// 24시간 거래량 (USD)
    pub total_volume: Option<f64>,
    /// 24시간 가격 변화 (절대값)
    pub price_change_24h: Option<f64>,
    /// 24시간 가격 변화율 (%)
    pub price_change_percentage_24h: Option<f64>,
    /// 7일 가격 변화율 (%)
    pub price_change_percentage_7d_in_currency: Option<f64>,
    /// 30일 가격 변화율 (%)
    pub price_change_percentage_30d_in_currency: Option<f64>,
    /// 역대 최고가 (USD)
    pub ath: Option<f64>,
    /// 역대 최고가 달성일
    pub ath_date: Option<String>,
    /// 소스 최종 갱신 시각
    pub last_updated: Option<String>,
}

/// `/global` 응답 래퍼.
#[derive(Debug, Clone, Deserialize)]
struct GlobalResponse {
    data: GlobalMetricsData,
}

/// 글로벌 시장 지표.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalMetricsData {
    /// 통화별 총 시가총액
    pub total_market_cap: CurrencyValues,
    /// 통화별 총 거래량
    pub total_volume: CurrencyValues,
    /// BTC 도미넌스 (%)
    pub btc_dominance: Option<f64>,
}

/// 통화 코드 → 값 매핑 중 USD만 사용.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyValues {
    pub usd: Option<f64>,
}

impl CoinGeckoClient {
    /// 프로덕션 API 주소로 클라이언트 생성.
    pub fn new() -> Self {
        Self::with_base_url("https://api.coingecko.com/api/v3")
    }

    /// Base URL을 지정하여 클라이언트 생성 (테스트용).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(BULK_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    /// 시가총액 상위 250개 코인 시장 데이터 조회.
    ///
    /// 요청 파라미터는 고정입니다: USD 기준, 시가총액 내림차순,
    /// 24h/7d/30d 변화율 포함, sparkline 제외.
    pub async fn fetch_markets(&self) -> Result<Vec<MarketCoin>> {
        let url = format!("{}/coins/markets", self.base_url);

        tracing::debug!(url = %url, "CoinGecko 시장 데이터 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", "250"),
                ("page", "1"),
                ("price_change_percentage", "24h,7d,30d"),
                ("sparkline", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "CoinGecko API 오류 [/coins/markets]: {} - {}",
                status, body
            )));
        }

        let coins: Vec<MarketCoin> = response.json().await?;
        Ok(coins)
    }

    /// 글로벌 시장 지표 조회.
    ///
    /// 응답의 최상위 `data` 키가 없으면 역직렬화 오류로 실패합니다.
    pub async fn fetch_global(&self) -> Result<GlobalMetricsData> {
        let url = format!("{}/global", self.base_url);

        tracing::debug!(url = %url, "CoinGecko 글로벌 지표 요청");

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(GLOBAL_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "CoinGecko API 오류 [/global]: {} - {}",
                status, body
            )));
        }

        let global: GlobalResponse = response.json().await?;
        Ok(global.data)
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_markets_full_record() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::UrlEncoded(
                "vs_currency".into(),
                "usd".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "id": "bitcoin",
                    "symbol": "btc",
                    "name": "Bitcoin",
                    "current_price": 64000.5,
                    "market_cap": 1260000000000.0,
                    "total_volume": 35000000000.0,
                    "price_change_24h": -1200.3,
                    "price_change_percentage_24h": -1.84,
                    "price_change_percentage_7d_in_currency": 3.2,
                    "price_change_percentage_30d_in_currency": 8.7,
                    "ath": 73750.0,
                    "ath_date": "2024-03-14T07:10:36.635Z",
                    "last_updated": "2024-06-01T00:00:00.000Z"
                }]"#,
            )
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let coins = client.fetch_markets().await.unwrap();

        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[0].current_price, Some(64000.5));
        assert_eq!(coins[0].price_change_percentage_7d_in_currency, Some(3.2));
    }

    #[tokio::test]
    async fn test_fetch_markets_missing_optional_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "mystery-coin", "ath": null}]"#)
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let coins = client.fetch_markets().await.unwrap();

        // 선택 필드 누락은 None으로 처리, 수집은 계속
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id, "mystery-coin");
        assert!(coins[0].symbol.is_none());
        assert!(coins[0].ath.is_none());
        assert!(coins[0].ath_date.is_none());
    }

    #[tokio::test]
    async fn test_fetch_markets_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let result = client.fetch_markets().await;

        assert!(matches!(result, Err(DataError::FetchError(_))));
    }

    #[tokio::test]
    async fn test_fetch_global() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/global")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "data": {
                        "total_market_cap": {"usd": 2300000000000.0, "eur": 2100000000000.0},
                        "total_volume": {"usd": 98000000000.0},
                        "btc_dominance": 54.3
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let global = client.fetch_global().await.unwrap();

        assert_eq!(global.total_market_cap.usd, Some(2300000000000.0));
        assert_eq!(global.total_volume.usd, Some(98000000000.0));
        assert_eq!(global.btc_dominance, Some(54.3));
    }

    #[tokio::test]
    async fn test_fetch_global_missing_data_key() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/global")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": {}}"#)
            .create_async()
            .await;

        let client = CoinGeckoClient::with_base_url(server.url());
        let result = client.fetch_global().await;

        assert!(result.is_err());
    }
}
