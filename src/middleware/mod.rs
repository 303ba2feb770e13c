//! # 미들웨어 / Extractor
//!
//! - `auth`: Bearer 토큰에서 호출자(`AuthUser`)를 추출

pub mod auth;
