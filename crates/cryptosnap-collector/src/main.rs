//! Daily snapshot collector CLI.

use clap::{Parser, Subcommand};
use cryptosnap_collector::{modules, CollectorConfig};
use cryptosnap_data::provider::{CoinGeckoClient, DefiLlamaClient, OpenSeaClient};
use cryptosnap_data::SnapshotStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cryptosnap-collector")]
#[command(about = "Cryptosnap Daily Market Snapshot Collector", long_about = None)]
#[command(version)]
struct Cli {
    /// 생략 시 전체 수집 실행
    #[command(subcommand)]
    command: Option<Commands>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 코인 시장 스냅샷 수집 (CoinGecko 상위 250개)
    CollectCoins,

    /// 글로벌 시장 지표 수집
    CollectGlobal,

    /// DeFi 유동성 풀 수집 (APY 상위 250개)
    CollectYields,

    /// NFT 컬렉션 수집 (이더리움 1일 거래량 상위 100개)
    CollectNfts,

    /// 전체 수집 실행 (코인 → 글로벌 → 풀 → NFT)
    RunAll,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "cryptosnap_collector={},cryptosnap_data={}",
                    cli.log_level, cli.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Cryptosnap Collector 시작");

    // 설정 로드 (API 키 미설정 시 즉시 실패)
    let config = CollectorConfig::from_env()?;
    tracing::debug!(database_path = %config.database_path.display(), "설정 로드 완료");

    // 저장소 연결 및 스키마 초기화
    let store = SnapshotStore::connect(&config.database_path).await?;
    store.init_schema().await?;

    let today = chrono::Utc::now().date_naive();

    let coingecko = CoinGeckoClient::new();
    let defillama = DefiLlamaClient::new();
    let opensea = OpenSeaClient::new(config.opensea_api_key.as_str());

    // 명령 실행
    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Some(Commands::CollectCoins) => {
            let stats = modules::sync_coins(&store, &coingecko, today).await?;
            stats.log_summary("코인 스냅샷");
            Ok(())
        }
        Some(Commands::CollectGlobal) => {
            let stats = modules::sync_global(&store, &coingecko, today).await?;
            stats.log_summary("글로벌 지표");
            Ok(())
        }
        Some(Commands::CollectYields) => {
            let stats = modules::sync_yields(&store, &defillama, today).await?;
            stats.log_summary("유동성 풀");
            Ok(())
        }
        Some(Commands::CollectNfts) => {
            let stats = modules::sync_nfts(&store, &opensea, today).await?;
            stats.log_summary("NFT 컬렉션");
            Ok(())
        }
        Some(Commands::RunAll) | None => {
            tracing::info!(date = %today, "=== 전체 수집 시작 ===");

            let mut total_records = 0usize;
            let mut failed_sources = 0usize;

            // 1. 코인 시장
            tracing::info!("Step 1/4: 코인 스냅샷");
            match modules::sync_coins(&store, &coingecko, today).await {
                Ok(stats) => {
                    stats.log_summary("코인 스냅샷");
                    total_records += stats.records;
                }
                Err(e) => {
                    failed_sources += 1;
                    tracing::error!(error = %e, "코인 스냅샷 수집 실패");
                }
            }

            // 2. 글로벌 지표
            tracing::info!("Step 2/4: 글로벌 지표");
            match modules::sync_global(&store, &coingecko, today).await {
                Ok(stats) => {
                    stats.log_summary("글로벌 지표");
                    total_records += stats.records;
                }
                Err(e) => {
                    failed_sources += 1;
                    tracing::error!(error = %e, "글로벌 지표 수집 실패");
                }
            }

            // 3. 유동성 풀
            tracing::info!("Step 3/4: 유동성 풀");
            match modules::sync_yields(&store, &defillama, today).await {
                Ok(stats) => {
                    stats.log_summary("유동성 풀");
                    total_records += stats.records;
                }
                Err(e) => {
                    failed_sources += 1;
                    tracing::error!(error = %e, "유동성 풀 수집 실패");
                }
            }

            // 4. NFT 컬렉션
            tracing::info!("Step 4/4: NFT 컬렉션");
            match modules::sync_nfts(&store, &opensea, today).await {
                Ok(stats) => {
                    stats.log_summary("NFT 컬렉션");
                    total_records += stats.records;
                }
                Err(e) => {
                    failed_sources += 1;
                    tracing::error!(error = %e, "NFT 컬렉션 수집 실패");
                }
            }

            tracing::info!(
                date = %today,
                total_records,
                failed_sources,
                "=== 전체 수집 완료 ==="
            );

            if failed_sources > 0 {
                Err(format!("{}개 소스 수집 실패", failed_sources).into())
            } else {
                Ok(())
            }
        }
    };

    store.close().await;
    tracing::info!("Cryptosnap Collector 종료");

    result
}
