//! # 문서 접근 확인 (Authorization Gate)
//!
//! 문서 ID를 받는 모든 작업은 다음 순서로 확인합니다:
//! 1. 문서가 없으면 `NotFound`
//! 2. 소유자가 호출자와 다르면 `Forbidden`
//!
//! 수정 작업은 `WHERE id = ? AND owner_id = ?` 조건부 쓰기로 확인과 쓰기를 한 번에
//! 처리하고, 일치한 행이 없을 때만 `deny`로 이유를 가려냅니다.

use crate::{db, error::AppError, middleware::auth::AuthUser, models::Document};
use sqlx::SqlitePool;

/// 조회한 문서를 호출자 기준으로 확인합니다.
pub fn authorize(document: Option<Document>, caller: &AuthUser) -> Result<Document, AppError> {
    let document = document.ok_or(AppError::NotFound)?;
    if document.owner_id != caller.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(document)
}

/// 조건부 쓰기가 아무 행도 바꾸지 못했을 때, 그 이유에 맞는 에러를 만듭니다.
///
/// 소유자는 바뀌지 않으므로, 문서가 남아 있는데 소유자가 같다면
/// 쓰기와 조회 사이에 삭제 후 같은 ID로 재생성된 경우뿐입니다. 이때도 `NotFound`로 봅니다.
pub async fn deny(pool: &SqlitePool, id: &str, caller: &AuthUser) -> AppError {
    match db::get_document(pool, id).await {
        Ok(document) => match authorize(document, caller) {
            Ok(_) => AppError::NotFound,
            Err(e) => e,
        },
        Err(e) => e,
    }
}
