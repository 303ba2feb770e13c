//! # 문서 모델 정의
//!
//! - `Document`: `documents` 테이블 한 행(row)
//! - `CreateDocumentRequest` / `UpdateDocumentRequest`: 요청 본문
//! - `ChildrenQuery` / `SearchQuery`: 목록 API의 쿼리 파라미터
//! - `CascadeOutcome`: 보관/복원 결과

use serde::{Deserialize, Deserializer, Serialize};

/// 사용자 문서 트리의 노드
///
/// `parent_id`가 `None`이면 최상위 문서입니다.
/// `owner_id`는 생성 후 절대 바뀌지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub owner_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub content: Option<String>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub is_archived: bool,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: Option<String>,
    pub parent_id: Option<String>,
}

/// 문서 필드 부분 수정 요청 (PATCH)
///
/// `icon`, `cover_image`: None = 필드 누락 (변경 안 함), Some(None) = null (제거), Some(Some(v)) = 설정
///
/// 보관 상태와 부모는 여기서 바꿀 수 없습니다. 보관/복원 API만 하위 문서까지 전파합니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    pub is_published: Option<bool>,
}

/// 필드가 있으면 null이어도 `Some(None)`이 되도록 감쌉니다.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `GET /documents?parent_id=...` — 생략하면 최상위 문서 목록
#[derive(Debug, Default, Deserialize)]
pub struct ChildrenQuery {
    pub parent_id: Option<String>,
}

/// `GET /documents/search?q=...` — 생략하면 보관되지 않은 전체 문서
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// 보관/복원 성공 결과
///
/// `document`는 요청 대상 문서(수정 후 상태),
/// `affected`는 상태가 기록된 모든 문서 ID(대상 포함)입니다.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeOutcome {
    pub document: Document,
    pub affected: Vec<String>,
}
