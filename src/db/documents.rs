//! # 문서 데이터베이스 쿼리 모듈
//!
//! `documents` 테이블에 대한 조회/삽입/수정/삭제 쿼리 함수들입니다.
//!
//! 수정·삭제 쿼리는 모두 `WHERE id = ? AND owner_id = ?`로 범위를 좁힙니다.
//! 소유자 확인과 쓰기가 한 SQL 문 안에서 일어나므로, 확인과 수정 사이에
//! 다른 요청이 끼어들 수 없습니다. 영향받은 행이 없으면 `false`를 돌려주고,
//! 없는 문서인지 남의 문서인지는 호출하는 쪽(`services::access`)이 구분합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// ID로 단일 문서를 조회합니다. 소유자는 확인하지 않습니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 문서를 찾은 경우
/// - `Ok(None)`: 해당 ID의 문서가 없는 경우
pub async fn get_document(pool: &SqlitePool, id: &str) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, parent_id, title, content, icon, cover_image,
               is_archived, is_published, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}

/// 한 부모 아래의 보관되지 않은 문서를 최신순으로 조회합니다 (사이드바).
///
/// `parent_id`가 `None`이면 최상위 문서를 조회합니다.
/// SQLite의 `IS` 비교는 NULL끼리도 같다고 보므로 두 경우를 한 쿼리로 처리합니다.
pub async fn list_children(
    pool: &SqlitePool,
    owner_id: &str,
    parent_id: Option<&str>,
) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, parent_id, title, content, icon, cover_image,
               is_archived, is_published, created_at, updated_at
        FROM documents
        WHERE owner_id = ? AND parent_id IS ? AND is_archived = 0
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(owner_id)
    .bind(parent_id)
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// 보관 상태로 걸러낸 사용자의 모든 문서를 최신순으로 조회합니다.
///
/// - `archived = true`: 휴지통
/// - `archived = false`: 검색 목록
///
/// 제목 필터는 여기서 걸지 않습니다. SQLite의 `lower()`는 ASCII만 바꾸므로
/// 대소문자 무시 비교는 `services::documents`에서 Rust 문자열로 합니다.
pub async fn list_by_owner(
    pool: &SqlitePool,
    owner_id: &str,
    archived: bool,
) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, parent_id, title, content, icon, cover_image,
               is_archived, is_published, created_at, updated_at
        FROM documents
        WHERE owner_id = ? AND is_archived = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(owner_id)
    .bind(archived)
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// 한 문서의 직계 자식 ID를 생성 순서대로 조회합니다 (보관 여부 무관).
pub async fn list_child_ids(
    pool: &SqlitePool,
    owner_id: &str,
    parent_id: &str,
) -> Result<Vec<String>, AppError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT id FROM documents
        WHERE owner_id = ? AND parent_id = ?
        ORDER BY created_at, rowid
        "#,
    )
    .bind(owner_id)
    .bind(parent_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 새 문서를 삽입하고, 삽입된 행을 다시 조회하여 반환합니다.
pub async fn create_document(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
    title: &str,
    parent_id: Option<&str>,
) -> Result<Document, AppError> {
    sqlx::query(
        r#"
        INSERT INTO documents (id, owner_id, parent_id, title, is_archived, is_published)
        VALUES (?, ?, ?, ?, 0, 0)
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(parent_id)
    .bind(title)
    .execute(pool)
    .await?;

    get_document(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created document".to_string()))
}

/// 한 문서의 보관 상태를 기록합니다.
///
/// 이미 같은 상태여도 행이 일치하면 `true`입니다 (SQLite는 일치한 행 수를 셉니다).
/// 그래서 같은 보관/복원을 여러 번 실행해도 실패하지 않습니다.
pub async fn set_archived(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
    archived: bool,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE documents
        SET is_archived = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(archived)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 복원 대상 문서를 보관 해제합니다.
///
/// 부모가 존재하고 보관된 상태라면 같은 문장에서 `parent_id`를 비워 최상위로 옮깁니다.
/// 부모 행이 없으면(삭제된 부모) `parent_id`는 그대로 둡니다.
pub async fn restore_root(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE documents
        SET is_archived = 0,
            parent_id = CASE
                WHEN EXISTS (
                    SELECT 1 FROM documents AS parent
                    WHERE parent.id = documents.parent_id AND parent.is_archived = 1
                ) THEN NULL
                ELSE parent_id
            END,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 문서 필드를 부분 수정합니다 (PATCH).
///
/// 요청에 포함된 필드만 SET 절에 넣습니다. `updated_at`은 항상 갱신됩니다.
pub async fn update_document(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
    req: &UpdateDocumentRequest,
) -> Result<bool, AppError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "UPDATE documents SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );

    if let Some(title) = &req.title {
        query.push(", title = ").push_bind(title);
    }
    if let Some(content) = &req.content {
        query.push(", content = ").push_bind(content);
    }
    if let Some(icon) = &req.icon {
        query.push(", icon = ").push_bind(icon);
    }
    if let Some(cover_image) = &req.cover_image {
        query.push(", cover_image = ").push_bind(cover_image);
    }
    if let Some(is_published) = req.is_published {
        query.push(", is_published = ").push_bind(is_published);
    }

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND owner_id = ")
        .push_bind(owner_id);

    let result = query.build().execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// 문서 한 개를 삭제합니다. 자식 문서는 건드리지 않습니다.
pub async fn delete_document(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
