//! 도메인 계층
//!
//! - [`entities`] - 저장되는 엔티티 (`Account`)
//! - [`dto`] - HTTP 요청/응답 본문
//! - [`models`] - 저장되지 않는 값 객체 (로그인 결과, 토큰 클레임, 검증된 외부 신원)

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::{Account, AccountId};
pub use dto::{AccountResponse, AccountUpdate, GoogleLoginRequest, LoginCredentials, NewAccount};
pub use models::{AuthenticatedAccount, LoginResult, TokenClaims, VerifiedIdentity};
