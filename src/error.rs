//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `CascadeFailure`: 보관/복원 전파가 중간에 멈췄을 때의 상세 정보
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 인증 실패(토큰 없음/잘못됨/만료)는 `middleware::auth::AuthError`가 담당합니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 문서가 없음 (HTTP 404)
    #[error("Document not found")]
    NotFound,

    /// 다른 사용자의 문서에 접근 (HTTP 403)
    #[error("You do not have permission to access this document")]
    Forbidden,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 하위 문서 전파 도중 실패 (HTTP 500)
    /// 이미 바뀐 문서는 그대로 남으므로, 같은 요청을 다시 보내면 수렴합니다.
    #[error(transparent)]
    Cascade(#[from] CascadeFailure),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 보관/복원 전파가 중간에 멈춘 지점
///
/// 롤백은 하지 않습니다. `patched`에 들어 있는 문서는 이미 새 상태이고,
/// 보관·복원은 멱등(idempotent)이므로 다시 실행하면 나머지가 마저 처리됩니다.
#[derive(Debug, Error)]
#[error("cascade from {root_id} stopped at {failed_id} after {} document(s): {reason}", .patched.len())]
pub struct CascadeFailure {
    /// 요청 대상(전파의 시작점) 문서 ID
    pub root_id: String,
    /// 읽기 또는 수정에 실패한 문서 ID
    pub failed_id: String,
    /// 실패 전에 이미 수정된 문서 ID (시작점 포함)
    pub patched: Vec<String>,
    /// 실패 원인
    pub reason: String,
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 내용을 로그에만 남기고
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Cascade(failure) => return cascade_response(failure),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// 전파 실패는 클라이언트가 재시도 여부를 판단할 수 있도록
/// 실패 지점과 이미 처리된 문서 수를 함께 돌려줍니다.
fn cascade_response(failure: CascadeFailure) -> Response {
    tracing::error!("{}", failure);

    let body = Json(json!({
        "error": {
            "code": "cascade_error",
            "message": "The operation stopped before every nested document was updated",
            "document_id": failure.root_id,
            "failed_id": failure.failed_id,
            "patched": failure.patched.len(),
            "retryable": true
        }
    }));

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
