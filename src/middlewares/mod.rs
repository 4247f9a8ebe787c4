//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <JWT>` 헤더 추출 및 검증
//! - 검증된 주체를 [`AuthenticatedAccount`](crate::domain::models::AuthenticatedAccount)로
//!   request extension에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(web::Data::from(token_service.clone()))
//!     .service(
//!         web::scope("/api/v1/accounts")
//!             .wrap(AuthMiddleware::required())
//!             .service(list_accounts)
//!     )
//! ```
//!
//! 토큰 검증에는 앱 데이터로 등록된 `web::Data<TokenService>`를 사용합니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
