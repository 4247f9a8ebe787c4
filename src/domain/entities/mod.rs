//! 도메인 엔티티
//!
//! 영구 저장소에 보관되는 데이터 구조를 정의합니다.

pub mod accounts;

pub use accounts::*;
