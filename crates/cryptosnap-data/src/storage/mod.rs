//! SQLite 기반 스냅샷 저장소.
//!
//! 모든 테이블은 (날짜, 엔티티 ID) 복합 키를 사용하며,
//! 같은 키로 다시 쓰면 기존 행을 덮어씁니다 (upsert).
//! 소스별 저장은 단일 트랜잭션으로 수행되어 부분 커밋이 없습니다.

pub mod coins;
pub mod collections;
pub mod global;
pub mod pools;
pub mod schema;

pub use coins::CoinSnapshotRecord;
pub use collections::NftCollectionRecord;
pub use global::GlobalMetricsRecord;
pub use pools::YieldPoolRecord;

use crate::error::{DataError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// 스냅샷 저장소.
///
/// 파일 기반 SQLite 데이터베이스를 감싸며, 단일 쓰기자 모델로 동작합니다.
#[derive(Clone)]
pub struct SnapshotStore {
    pool: SqlitePool,
}

impl SnapshotStore {
    /// 파일 경로로 저장소 연결.
    ///
    /// 상위 디렉터리가 없으면 생성하고, 데이터베이스 파일도
    /// 없으면 새로 만듭니다.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DataError::ConnectionError(format!(
                        "데이터 디렉터리 생성 실패 ({}): {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        tracing::info!(path = %path.display(), "스냅샷 저장소 연결 완료");

        Ok(Self { pool })
    }

    /// 인메모리 저장소 생성 (테스트용).
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// 내부 연결 풀 참조.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 연결 종료.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
