//! # 서비스 계층
//!
//! 라우트 핸들러와 DB 쿼리 사이의 비즈니스 로직입니다.
//! - `access`: 문서 소유자 확인
//! - `documents`: 목록/생성/조회/수정/삭제
//! - `cascade`: 하위 문서까지 전파되는 보관/복원

pub mod access;
pub mod cascade;
pub mod documents;
