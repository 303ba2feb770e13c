//! # 보관(archive) / 복원(restore) 전파
//!
//! 문서를 보관하면 그 아래의 모든 하위 문서도 보관되어야 하고,
//! 복원하면 모든 하위 문서가 함께 복원됩니다.
//!
//! ## 동작 방식
//! ```text
//! 1. 대상 문서를 조건부 쓰기로 수정 (소유자 확인 포함, 실패 시 NotFound/Forbidden)
//! 2. 작업 목록(stack)에 대상 ID를 넣고
//! 3. 하나씩 꺼내 직계 자식을 조회 → 자식마다 상태 기록 → 작업 목록에 추가
//! ```
//! 재귀 호출 대신 명시적 작업 목록을 쓰므로 트리가 깊어도 호출 스택이 자라지 않습니다.
//! 이미 방문한 ID는 건너뛰어, 잘못된 데이터에 순환이 있어도 끝납니다.
//!
//! ## 실패 처리
//! 전파 전체가 하나의 트랜잭션은 아닙니다. 문서 하나의 수정만 원자적입니다.
//! 중간에 실패하면 `CascadeFailure`로 멈추고, 이미 바뀐 문서는 되돌리지 않습니다.
//! 같은 상태를 다시 기록해도 문제가 없으므로 클라이언트는 그냥 다시 요청하면 됩니다.

use crate::{
    db,
    error::{AppError, CascadeFailure},
    middleware::auth::AuthUser,
    models::{CascadeOutcome, Document},
    services::access,
};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// 문서와 모든 하위 문서를 보관합니다.
pub async fn archive(
    pool: &SqlitePool,
    caller: &AuthUser,
    id: &str,
) -> Result<CascadeOutcome, AppError> {
    if !db::set_archived(pool, id, &caller.user_id, true).await? {
        return Err(access::deny(pool, id, caller).await);
    }
    let document = reload(pool, id).await?;

    let affected = propagate(pool, &caller.user_id, id, true).await?;
    tracing::info!(
        "Archived document {} and {} nested document(s) for {}",
        id,
        affected.len() - 1,
        caller.user_id
    );

    Ok(CascadeOutcome { document, affected })
}

/// 문서와 모든 하위 문서를 복원합니다.
///
/// 대상 문서의 부모가 아직 보관 상태라면 대상은 최상위로 옮겨집니다.
/// 하위 문서의 부모는 바꾸지 않습니다 (그 부모들은 방금 함께 복원되었습니다).
pub async fn restore(
    pool: &SqlitePool,
    caller: &AuthUser,
    id: &str,
) -> Result<CascadeOutcome, AppError> {
    let previous_parent = db::get_document(pool, id)
        .await?
        .and_then(|document| document.parent_id);

    if !db::restore_root(pool, id, &caller.user_id).await? {
        return Err(access::deny(pool, id, caller).await);
    }
    let document = reload(pool, id).await?;

    if let (Some(parent_id), None) = (&previous_parent, &document.parent_id) {
        tracing::info!(
            "Detached restored document {} from archived parent {}",
            id,
            parent_id
        );
    }

    let affected = propagate(pool, &caller.user_id, id, false).await?;
    tracing::info!(
        "Restored document {} and {} nested document(s) for {}",
        id,
        affected.len() - 1,
        caller.user_id
    );

    Ok(CascadeOutcome { document, affected })
}

/// 시작점 수정 직후의 문서를 다시 읽습니다.
async fn reload(pool: &SqlitePool, id: &str) -> Result<Document, AppError> {
    db::get_document(pool, id).await?.ok_or(AppError::NotFound)
}

/// `root_id` 아래의 모든 하위 문서에 보관 상태를 기록합니다.
///
/// 시작점 자신은 호출 전에 이미 기록되어 있어야 합니다.
/// 반환값은 기록된 문서 ID 목록이며 첫 번째 항목이 시작점입니다.
async fn propagate(
    pool: &SqlitePool,
    owner_id: &str,
    root_id: &str,
    archived: bool,
) -> Result<Vec<String>, CascadeFailure> {
    let mut patched = vec![root_id.to_string()];
    let mut visited: HashSet<String> = HashSet::from([root_id.to_string()]);
    let mut pending = vec![root_id.to_string()];

    while let Some(current) = pending.pop() {
        let children = match db::list_child_ids(pool, owner_id, &current).await {
            Ok(children) => children,
            Err(e) => return Err(stopped(root_id, &current, patched, e.to_string())),
        };

        for child in children {
            if !visited.insert(child.clone()) {
                tracing::warn!(
                    "Document {} was reached twice while cascading from {}; skipping",
                    child,
                    root_id
                );
                continue;
            }

            match db::set_archived(pool, &child, owner_id, archived).await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(stopped(
                        root_id,
                        &child,
                        patched,
                        "document disappeared during the cascade".to_string(),
                    ))
                }
                Err(e) => return Err(stopped(root_id, &child, patched, e.to_string())),
            }

            tracing::debug!("Set is_archived={} on {}", archived, child);
            patched.push(child.clone());
            pending.push(child);
        }
    }

    Ok(patched)
}

fn stopped(root_id: &str, failed_id: &str, patched: Vec<String>, reason: String) -> CascadeFailure {
    CascadeFailure {
        root_id: root_id.to_string(),
        failed_id: failed_id.to_string(),
        patched,
        reason,
    }
}
