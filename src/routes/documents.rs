//! # 문서(Document) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/documents?parent_id=`    → 사이드바 (한 단계 자식 목록)
//! - `POST   /api/v1/documents`               → 새 문서 생성
//! - `GET    /api/v1/documents/trash`         → 휴지통
//! - `GET    /api/v1/documents/search?q=`     → 검색 목록
//! - `GET    /api/v1/documents/{id}`          → 단일 문서 조회
//! - `PATCH  /api/v1/documents/{id}`          → 필드 수정
//! - `DELETE /api/v1/documents/{id}`          → 영구 삭제 (하위 문서는 남음)
//! - `POST   /api/v1/documents/{id}/archive`  → 하위 문서까지 보관
//! - `POST   /api/v1/documents/{id}/restore`  → 하위 문서까지 복원
//!
//! 모든 핸들러는 `AuthUser` Extractor로 호출자를 확인한 뒤 서비스 함수에 넘깁니다.

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services::{cascade, documents},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 호출자 토큰 검증용 비밀키
    pub jwt_secret: String,
}

/// `GET /documents` — `parent_id`가 없으면 최상위 문서 목록
pub async fn list_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ChildrenQuery>,
) -> Result<Json<Value>, AppError> {
    let documents =
        documents::list_children(&state.pool, &auth_user, query.parent_id.as_deref()).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `GET /documents/trash`
pub async fn list_trash(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let documents = documents::list_trash(&state.pool, &auth_user).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `GET /documents/search`
pub async fn search_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let documents =
        documents::list_searchable(&state.pool, &auth_user, query.q.as_deref()).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `POST /documents` — 응답: `{ "id": "..." }` (HTTP 201)
pub async fn create_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let document = documents::create(&state.pool, &auth_user, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": document.id }))))
}

/// `GET /documents/{id}`
pub async fn get_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let document = documents::get(&state.pool, &auth_user, &id).await?;
    Ok(Json(document))
}

/// `PATCH /documents/{id}` — 요청에 포함된 필드만 수정합니다.
pub async fn update_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let document = documents::update(&state.pool, &auth_user, &id, &req).await?;
    Ok(Json(document))
}

/// `DELETE /documents/{id}` — 응답: `{ "id": "..." }`
pub async fn delete_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = documents::remove(&state.pool, &auth_user, &id).await?;
    Ok(Json(json!({ "id": id })))
}

/// `POST /documents/{id}/archive`
///
/// 전파 도중 실패하면 `cascade_error`(HTTP 500)이며, 같은 요청을 다시 보내면 됩니다.
pub async fn archive_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CascadeOutcome>, AppError> {
    let outcome = cascade::archive(&state.pool, &auth_user, &id).await?;
    Ok(Json(outcome))
}

/// `POST /documents/{id}/restore`
pub async fn restore_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CascadeOutcome>, AppError> {
    let outcome = cascade::restore(&state.pool, &auth_user, &id).await?;
    Ok(Json(outcome))
}
