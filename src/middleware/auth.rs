//! # 호출자 신원(Identity) 추출
//!
//! 토큰 발급은 외부 인증 제공자가 담당하고, 이 서버는 검증만 합니다.
//! `Authorization: Bearer <jwt>` 헤더의 `sub` 클레임이 문서 소유자 ID가 됩니다.
//!
//! 핸들러가 `AuthUser`를 매개변수로 받으면 검증이 자동으로 수행되고,
//! 이 값이 그대로 서비스 함수에 전달됩니다 (전역 세션 상태 없음).
//!
//! 검증 순서:
//! 1. `Authorization` 헤더가 있는지 (`MissingToken`)
//! 2. `Bearer ` 접두사가 있는지 (`InvalidToken`)
//! 3. HS256 서명과 `exp`/`sub` 클레임 (`InvalidToken` / `ExpiredToken`)

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::routes::documents::AppState;

/// 인증 제공자가 서명한 토큰의 클레임
///
/// `Serialize`는 로컬 개발이나 테스트에서 같은 형식의 토큰을 만들 때 씁니다.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 사용자(문서 소유자) ID
    pub sub: String,
    /// 만료 시각 (Unix 초)
    pub exp: i64,
    /// 발급 시각 (Unix 초)
    pub iat: i64,
}

/// 인증된 호출자. 모든 문서 작업에 명시적으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

impl AuthUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

// FromRequestParts: 요청 본문(body)을 건드리지 않고 헤더만 보는 Extractor.
// 그래서 `Json<...>` 같은 본문 Extractor와 함께 한 핸들러에 쓸 수 있습니다.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        identify(token, &state.jwt_secret)
    }
}

/// `Authorization: Bearer <token>`에서 토큰 부분만 꺼냅니다.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

/// 토큰을 검증하고 호출자를 돌려줍니다.
///
/// 서명 키는 인증 제공자와 공유하는 `JWT_SECRET`입니다.
/// `exp`와 `sub`가 없는 토큰은 받지 않고, 빈 `sub`도 거부합니다.
pub fn identify(token: &str, secret: &str) -> Result<AuthUser, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    if data.claims.sub.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(AuthUser::new(data.claims.sub))
}

/// 신원을 확인할 수 없음 (모두 HTTP 401)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization token is required")]
    MissingToken,
    #[error("Invalid authorization token")]
    InvalidToken,
    #[error("Authorization token has expired")]
    ExpiredToken,
}

// 만료만 따로 구분하고, 나머지 검증 실패(서명 불일치, 형식 오류 등)는 모두 InvalidToken
impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
