//! # Cryptosnap Data
//!
//! 암호화폐 시장 스냅샷 수집에 필요한 데이터 계층을 제공합니다:
//! - 외부 API 클라이언트 (CoinGecko, DefiLlama, OpenSea)
//! - SQLite 기반 스냅샷 저장소 (날짜 + 엔티티 ID 복합 키)

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};
pub use storage::SnapshotStore;
