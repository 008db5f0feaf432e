//! DefiLlama Yields API 클라이언트.
//!
//! DeFi 유동성 풀의 수익률(APY) 데이터를 수집합니다.
//! 전체 풀 목록을 그대로 반환하며, APY 기준 상위 선별은
//! 수집 모듈에서 수행합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use cryptosnap_data::provider::DefiLlamaClient;
//!
//! let client = DefiLlamaClient::new();
//! let pools = client.fetch_pools().await?;
//! ```

use crate::error::{DataError, Result};
use serde::Deserialize;
use std::time::Duration;

/// 요청 타임아웃 (초)
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// DefiLlama Yields API 클라이언트.
#[derive(Clone)]
pub struct DefiLlamaClient {
    client: reqwest::Client,
    base_url: String,
}

/// `/pools` 응답 래퍼.
#[derive(Debug, Clone, Deserialize)]
struct PoolsResponse {
    data: Vec<PoolInfo>,
}

/// 유동성 풀 정보.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInfo {
    /// 풀 식별자 (엔티티 키)
    pub pool: String,
    /// 체인명 (예: "Ethereum")
    pub chain: Option<String>,
    /// 프로젝트명 (예: "aave-v3")
    pub project: Option<String>,
    /// 풀 심볼 (예: "USDC-WETH")
    pub symbol: Option<String>,
    /// TVL (USD)
    pub tvl_usd: Option<f64>,
    /// 총 APY (%)
    pub apy: Option<f64>,
    /// 기본 APY (%)
    pub apy_base: Option<f64>,
    /// 리워드 APY (%)
    pub apy_reward: Option<f64>,
    /// 1일 거래량 (USD)
    pub volume_usd_1d: Option<f64>,
    /// 스테이블코인 풀 여부 (누락 시 false)
    #[serde(default)]
    pub stablecoin: bool,
}

impl DefiLlamaClient {
    /// 프로덕션 API 주소로 클라이언트 생성.
    pub fn new() -> Self {
        Self::with_base_url("https://yields.llama.fi")
    }

    /// Base URL을 지정하여 클라이언트 생성 (테스트용).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }

    /// 전체 유동성 풀 목록 조회.
    ///
    /// 응답의 최상위 `data` 키가 없으면 역직렬화 오류로 실패합니다.
    pub async fn fetch_pools(&self) -> Result<Vec<PoolInfo>> {
        let url = format!("{}/pools", self.base_url);

        tracing::debug!(url = %url, "DefiLlama 풀 목록 요청");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "DefiLlama API 오류 [/pools]: {} - {}",
                status, body
            )));
        }

        let pools: PoolsResponse = response.json().await?;
        Ok(pools.data)
    }
}

impl Default for DefiLlamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_pools() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pools")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "status": "success",
                    "data": [
                        {
                            "pool": "747c1d2a-c668-4682-b9f9-296708a3dd90",
                            "chain": "Ethereum",
                            "project": "lido",
                            "symbol": "STETH",
                            "tvlUsd": 14000000000.0,
                            "apy": 3.1,
                            "apyBase": 3.1,
                            "apyReward": null,
                            "volumeUsd1d": 12000000.0,
                            "stablecoin": false
                        },
                        {
                            "pool": "aa70268e-4b52-42bf-a116-608b370f9501",
                            "chain": "Ethereum",
                            "project": "aave-v3",
                            "symbol": "USDC",
                            "tvlUsd": 500000000.0,
                            "apy": 5.6,
                            "stablecoin": true
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = DefiLlamaClient::with_base_url(server.url());
        let pools = client.fetch_pools().await.unwrap();

        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].pool, "747c1d2a-c668-4682-b9f9-296708a3dd90");
        assert_eq!(pools[0].tvl_usd, Some(14000000000.0));
        assert!(pools[0].apy_reward.is_none());
        assert!(!pools[0].stablecoin);
        assert!(pools[1].stablecoin);
        // volumeUsd1d 누락 → None
        assert!(pools[1].volume_usd_1d.is_none());
    }

    #[tokio::test]
    async fn test_fetch_pools_stablecoin_default() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pools")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"pool": "p1", "apy": 1.0}]}"#)
            .create_async()
            .await;

        let client = DefiLlamaClient::with_base_url(server.url());
        let pools = client.fetch_pools().await.unwrap();

        assert!(!pools[0].stablecoin);
    }

    #[tokio::test]
    async fn test_fetch_pools_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pools")
            .with_status(502)
            .create_async()
            .await;

        let client = DefiLlamaClient::with_base_url(server.url());
        let result = client.fetch_pools().await;

        assert!(matches!(result, Err(DataError::FetchError(_))));
    }
}
