//! Daily crypto market snapshot collector.
//!
//! 이 crate는 하루 단위 시장 스냅샷을 수집하는 바이너리를 제공합니다:
//! - 코인 시장 스냅샷 (CoinGecko, 상위 250개)
//! - 글로벌 시장 지표 (총 시가총액, BTC 도미넌스)
//! - DeFi 유동성 풀 (DefiLlama, APY 상위 250개)
//! - NFT 컬렉션 (OpenSea, 이더리움 1일 거래량 상위 100개)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
