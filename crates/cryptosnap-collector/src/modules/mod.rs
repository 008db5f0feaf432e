//! 소스별 수집 모듈.
//!
//! 각 모듈은 fetch → 레코드 매핑 → 단일 트랜잭션 저장을 수행합니다.
//! 소스 간 데이터 의존성은 없으며, 실패는 해당 소스에만 국한됩니다.

pub mod coin_sync;
pub mod global_sync;
pub mod nft_sync;
pub mod yield_sync;

pub use coin_sync::sync_coins;
pub use global_sync::sync_global;
pub use nft_sync::sync_nfts;
pub use yield_sync::sync_yields;
