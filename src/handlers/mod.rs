//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 요청 본문을 DTO로 받아
//! [`IdentityService`](crate::services::identity::IdentityService)에 위임하고,
//! 에러는 `AppError`의 `ResponseError` 구현이 상태 코드로 변환합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리      ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   IdentityService - 비즈니스 로직               ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   AccountStore - 데이터 접근                    ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 서비스는 `main`에서 한 번 생성되어 `web::Data`로 주입됩니다.

pub mod accounts;
pub mod auth;
