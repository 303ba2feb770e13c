//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! SQLite와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)이 이 모듈의 함수를 호출합니다.
//!
//! - `documents`: 문서 CRUD와 보관 상태 쿼리
//! - `connect` / `MIGRATOR`: 연결 풀 생성과 스키마 마이그레이션

pub mod documents;

pub use documents::*;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;

/// ./migrations의 SQL 파일을 컴파일 타임에 바이너리에 포함시킨 마이그레이터
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// 연결 풀을 만들고 아직 적용되지 않은 마이그레이션을 실행합니다.
///
/// 데이터베이스 파일이 없으면 새로 만듭니다.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // 파일 DB라면 상위 디렉토리를 먼저 만듭니다 (mkdir -p). 메모리 DB는 상위 경로가 비어 있습니다.
    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            tokio::fs::create_dir_all(dir).await?;
            tracing::info!("Created database directory: {}", dir.display());
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
