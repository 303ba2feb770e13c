//! # Neuro 문서 서비스
//!
//! 사용자별 문서 트리(노트 워크스페이스)를 관리하는 HTTP API입니다.
//!
//! - `config`: 환경변수 설정
//! - `db`: SQLite 쿼리와 마이그레이션
//! - `error`: 에러 타입과 HTTP 응답 변환
//! - `middleware`: 호출자 신원 추출
//! - `models`: 문서 구조체
//! - `routes`: 핸들러와 라우터
//! - `services`: 소유자 확인, 문서 작업, 보관/복원 전파

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
