//! # Neuro 웹 서버 진입점
//!
//! 실제 로직은 라이브러리 쪽(`src/lib.rs` 아래 모듈)에 있고,
//! 이 파일은 그것들을 조립해서 서버를 띄우기만 합니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. SQLite 연결 풀 생성 및 마이그레이션 실행
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

use anyhow::Result; // main()에서는 에러 종류를 구분할 필요가 없으므로 anyhow 사용
use neuro::{config::Config, db, routes, routes::documents::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다 (운영 환경은 시스템 환경변수 사용).
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry()에 필터와 포맷터를 레이어처럼 쌓아 전역 로거로 등록합니다.
    tracing_subscriber::registry()
        .with(
            // RUST_LOG 환경변수가 없으면 neuro, tower_http, axum 모듈을 debug 레벨로 설정
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neuro=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer()) // 터미널 출력 포맷터
        .init();

    // ── 3단계: 설정 로딩 ──
    // DATABASE_URL, JWT_SECRET이 없으면 여기서 바로 종료됩니다.
    let config = Config::from_env()?;
    tracing::info!("Starting Neuro server on {}:{}", config.host, config.port);

    // ── 4단계: 연결 풀 + 마이그레이션 ──
    // DB 파일과 상위 디렉토리가 없으면 만들고, 아직 적용되지 않은 마이그레이션을 실행합니다.
    let pool = db::connect(&config.database_url, config.database_max_connections).await?;

    // ── 5단계: 애플리케이션 상태와 라우터 ──
    // AppState는 모든 핸들러가 공유합니다. SqlitePool은 내부적으로 Arc라 복제 비용이 작습니다.
    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
    };
    let app = routes::router(state);

    // ── 6단계: HTTP 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // serve()는 서버가 종료될 때까지 반환되지 않습니다.
    axum::serve(listener, app).await?;

    Ok(())
}
