#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use neuro::{
    db,
    middleware::auth::{AuthUser, Claims},
    models::{CreateDocumentRequest, Document},
    services::documents,
};
use sqlx::SqlitePool;

pub const SECRET: &str = "test-provider-secret";

/// 마이그레이션이 적용된 메모리 DB. 연결이 하나뿐이라 모든 쿼리가 같은 DB를 봅니다.
pub async fn pool() -> SqlitePool {
    db::connect("sqlite::memory:", 1).await.unwrap()
}

/// 인증 제공자가 발급하는 것과 같은 형식의 15분짜리 토큰
pub fn token(user_id: &str, secret: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(15)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn user(id: &str) -> AuthUser {
    AuthUser::new(id)
}

pub async fn create(pool: &SqlitePool, caller: &AuthUser, title: &str, parent: Option<&str>) -> String {
    let req = CreateDocumentRequest {
        title: Some(title.to_string()),
        parent_id: parent.map(str::to_string),
    };
    documents::create(pool, caller, &req).await.unwrap().id
}

pub async fn fetch(pool: &SqlitePool, id: &str) -> Option<Document> {
    db::get_document(pool, id).await.unwrap()
}

pub fn ids(documents: &[Document]) -> Vec<String> {
    documents.iter().map(|d| d.id.clone()).collect()
}
