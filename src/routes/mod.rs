//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성입니다.
//!
//! - `documents`: 문서 목록/생성/수정/삭제/보관/복원
//! - `health`: 서버 상태 확인

pub mod documents;
pub mod health;

pub use documents::*;
pub use health::*;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 전체 라우터를 만듭니다. 모든 API는 `/api/v1` 아래에 있습니다.
///
/// `/documents/trash`, `/documents/search` 같은 고정 경로는
/// `/documents/{id}`보다 우선해서 매칭됩니다.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route("/documents/trash", get(list_trash))
        .route("/documents/search", get(search_documents))
        .route(
            "/documents/{id}",
            get(get_document)
                .patch(update_document)
                .delete(delete_document),
        )
        .route("/documents/{id}/archive", post(archive_document))
        .route("/documents/{id}/restore", post(restore_document))
        .route("/health", get(health_check))
        .with_state(state);

    // 개발 환경용 CORS 설정 (프론트엔드는 별도 출처에서 호출)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
