//! OpenSea API 클라이언트.
//!
//! 이더리움 체인 NFT 컬렉션 통계를 수집합니다.
//!
//! # API 키 관리
//!
//! 모든 요청에 `X-API-KEY` 헤더가 필요합니다. 키는 환경변수
//! `OPENSEA_API_KEY`에서 설정 계층이 읽어 클라이언트 생성 시 주입합니다.
//!
//! # Note
//! API 키를 하드코딩하지 마세요. `CollectorConfig::from_env()`를 통해
//! 전달받은 키를 사용하세요.

use crate::error::{DataError, Result};
use serde::Deserialize;
use std::time::Duration;

/// 요청 타임아웃 (초)
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OpenSea API 클라이언트.
#[derive(Clone)]
pub struct OpenSeaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// `/collections` 응답 래퍼.
#[derive(Debug, Clone, Deserialize)]
struct CollectionsResponse {
    collections: Vec<CollectionInfo>,
}

/// NFT 컬렉션 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    /// 컬렉션 슬러그 (엔티티 키)
    pub slug: String,
    /// 컬렉션명
    pub name: Option<String>,
    /// 통계 (null이면 통계 필드 전체를 None으로 저장)
    pub stats: Option<CollectionStatsInfo>,
}

/// 컬렉션 통계.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionStatsInfo {
    /// 바닥가 (ETH)
    pub floor_price: Option<f64>,
    /// 바닥가 (USD)
    pub floor_price_usd: Option<f64>,
    /// 1일 거래량 (ETH)
    pub one_day_volume: Option<f64>,
    /// 1일 거래량 (USD)
    pub one_day_volume_usd: Option<f64>,
    /// 1일 판매 건수
    pub one_day_sales: Option<f64>,
    /// 1일 평균 거래가 (ETH)
    pub one_day_average_price: Option<f64>,
    /// 총 발행량
    pub total_supply: Option<f64>,
    /// 보유자 수
    pub num_owners: Option<i64>,
}

impl OpenSeaClient {
    /// 프로덕션 API 주소로 클라이언트 생성.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.opensea.io/api/v2")
    }

    /// Base URL을 지정하여 클라이언트 생성 (테스트용).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// 이더리움 체인 1일 거래량 상위 100개 컬렉션 조회.
    pub async fn fetch_top_collections(&self) -> Result<Vec<CollectionInfo>> {
        let url = format!("{}/collections", self.base_url);

        tracing::debug!(url = %url, "OpenSea 컬렉션 목록 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("chain_identifier", "ethereum"),
                ("order_by", "one_day_volume"),
                ("order_direction", "desc"),
                ("limit", "100"),
            ])
            .header("X-API-KEY", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "OpenSea API 오류 [/collections]: {} - {}",
                status, body
            )));
        }

        let data: CollectionsResponse = response.json().await?;
        Ok(data.collections)
    }
}
