//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `document`: 문서(Document)와 요청/응답 구조체
//!
//! `pub use document::*;`로 `crate::models::Document`처럼 짧게 접근할 수 있습니다.

pub mod document;

pub use document::*;
