//! # 문서 서비스
//!
//! 목록 조회, 생성, 단일 조회, 필드 수정, 삭제를 담당합니다.
//! 모든 함수는 호출자(`AuthUser`)를 명시적으로 받고, 호출자 소유 문서만 다룹니다.
//!
//! 보관/복원은 하위 문서까지 전파해야 하므로 `services::cascade`에 따로 있습니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services::access,
};
use sqlx::SqlitePool;

/// 새 문서의 기본 제목
pub const DEFAULT_TITLE: &str = "Untitled";

/// 사이드바: 한 부모 아래의 보관되지 않은 문서 (최신순)
///
/// 빈 `parent_id`는 최상위 목록을 뜻합니다.
pub async fn list_children(
    pool: &SqlitePool,
    caller: &AuthUser,
    parent_id: Option<&str>,
) -> Result<Vec<Document>, AppError> {
    db::list_children(pool, &caller.user_id, blank_to_none(parent_id)).await
}

/// 휴지통: 보관된 문서 전체 (최신순, 계층 무시)
pub async fn list_trash(pool: &SqlitePool, caller: &AuthUser) -> Result<Vec<Document>, AppError> {
    db::list_by_owner(pool, &caller.user_id, true).await
}

/// 검색 목록: 보관되지 않은 문서 전체 (최신순, 계층 무시)
///
/// `query`가 있으면 제목에 그 문자열이 들어간 문서만 남깁니다 (대소문자 무시).
/// 공백뿐인 검색어는 없는 것으로 봅니다.
pub async fn list_searchable(
    pool: &SqlitePool,
    caller: &AuthUser,
    query: Option<&str>,
) -> Result<Vec<Document>, AppError> {
    let documents = db::list_by_owner(pool, &caller.user_id, false).await?;

    let Some(needle) = blank_to_none(query).map(str::to_lowercase) else {
        return Ok(documents);
    };

    Ok(documents
        .into_iter()
        .filter(|doc| doc.title.to_lowercase().contains(&needle))
        .collect())
}

/// 쿼리 문자열에서 빈 값(`?q=`, `?parent_id=`)은 값이 없는 것과 같습니다.
fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 호출자 소유의 새 문서를 만듭니다.
///
/// 제목이 없거나 공백뿐이면 `DEFAULT_TITLE`을 씁니다 (수정 시에는 `BadRequest`).
///
/// 부모가 다른 사용자의 문서라면 `Forbidden`입니다.
/// 부모가 존재하지 않는 경우는 허용합니다 (목록 조회가 `parent_id` 값 비교만 하므로
/// 이런 문서는 어떤 부모 아래에도 나타나지 않습니다).
pub async fn create(
    pool: &SqlitePool,
    caller: &AuthUser,
    req: &CreateDocumentRequest,
) -> Result<Document, AppError> {
    let title = match req.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title,
        _ => DEFAULT_TITLE,
    };
    let parent_id = req.parent_id.as_deref();

    if let Some(parent_id) = parent_id {
        match db::get_document(pool, parent_id).await? {
            Some(parent) if parent.owner_id != caller.user_id => {
                return Err(AppError::Forbidden);
            }
            Some(_) => {}
            None => {
                tracing::warn!(
                    "Creating document under missing parent {} for {}",
                    parent_id,
                    caller.user_id
                );
            }
        }
    }

    let id = uuid::Uuid::now_v7().to_string();
    let document = db::create_document(pool, &id, &caller.user_id, title, parent_id).await?;
    tracing::info!("Created document {} for {}", document.id, caller.user_id);

    Ok(document)
}

/// 단일 문서 조회 (보관 여부와 무관)
pub async fn get(pool: &SqlitePool, caller: &AuthUser, id: &str) -> Result<Document, AppError> {
    let document = db::get_document(pool, id).await?;
    access::authorize(document, caller)
}

/// 문서 필드를 부분 수정하고 수정된 문서를 반환합니다.
pub async fn update(
    pool: &SqlitePool,
    caller: &AuthUser,
    id: &str,
    req: &UpdateDocumentRequest,
) -> Result<Document, AppError> {
    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Title cannot be empty".to_string()));
        }
    }

    if !db::update_document(pool, id, &caller.user_id, req).await? {
        return Err(access::deny(pool, id, caller).await);
    }

    db::get_document(pool, id).await?.ok_or(AppError::NotFound)
}

/// 문서 한 개를 영구 삭제하고 삭제된 ID를 반환합니다.
///
/// 자식 문서는 삭제하지도, 옮기지도 않습니다. 자식의 `parent_id`는 사라진 ID를
/// 그대로 가리키게 되고, 더 이상 어떤 사이드바 목록에도 나타나지 않습니다.
pub async fn remove(pool: &SqlitePool, caller: &AuthUser, id: &str) -> Result<String, AppError> {
    if !db::delete_document(pool, id, &caller.user_id).await? {
        return Err(access::deny(pool, id, caller).await);
    }

    tracing::info!("Removed document {} for {}", id, caller.user_id);
    Ok(id.to_string())
}
