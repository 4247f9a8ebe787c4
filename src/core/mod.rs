//! # Core Module
//!
//! 서비스 전역에서 공유하는 기반 기능을 제공합니다.
//!
//! - [`errors`] - `AppError` 통합 에러 타입과 HTTP 응답 매핑
//! - [`keyed_lock`] - 문자열 키 단위로 비동기 작업을 직렬화하는 잠금 테이블

pub mod errors;
pub mod keyed_lock;

pub use errors::{AppError, AppResult, ErrorContext};
pub use keyed_lock::KeyedLock;
