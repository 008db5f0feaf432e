//! 환경변수 기반 설정 모듈.

use crate::error::CollectorError;
use crate::Result;
use std::path::PathBuf;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 데이터 디렉터리 (없으면 생성)
    pub data_dir: PathBuf,
    /// SQLite 데이터베이스 파일 경로
    pub database_path: PathBuf,
    /// OpenSea API 키 (필수)
    pub opensea_api_key: String,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    ///
    /// `OPENSEA_API_KEY`가 없거나 비어 있으면 즉시 설정 오류를
    /// 반환합니다. 요청 시점까지 placeholder 값으로 버티지 않습니다.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = PathBuf::from(env_var_or("DATA_DIR", "data"));

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("crypto.db"));

        let opensea_api_key = require_api_key(std::env::var("OPENSEA_API_KEY").ok())?;

        Ok(Self {
            data_dir,
            database_path,
            opensea_api_key,
        })
    }
}

/// 환경변수에서 값 조회 (없으면 기본값 사용)
fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// API 키 검증 (미설정/공백이면 설정 오류)
fn require_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(CollectorError::Config(
            "OPENSEA_API_KEY 환경변수가 설정되지 않았습니다".to_string(),
        )),
    }
}
