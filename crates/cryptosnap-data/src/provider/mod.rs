//! 외부 API 클라이언트 모듈.
//!
//! 각 클라이언트는 읽기 전용 HTTP GET 요청만 수행합니다.
//! 재시도/백오프 없이 실패 시 즉시 오류를 반환합니다.

pub mod coingecko;
pub mod defillama;
pub mod opensea;

pub use coingecko::{CoinGeckoClient, GlobalMetricsData, MarketCoin};
pub use defillama::{DefiLlamaClient, PoolInfo};
pub use opensea::{CollectionInfo, CollectionStatsInfo, OpenSeaClient};
