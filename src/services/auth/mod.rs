//! 인증 및 보안 서비스 모듈
//!
//! 신원 서비스가 조합하는 인증 구성 요소들입니다.
//!
//! - [`PasswordHasher`] - bcrypt 단방향 해시 및 검증
//! - [`TokenService`] - HS256 베어러 토큰 발급 및 검증
//! - [`IdentityVerifier`] / [`GoogleIdTokenVerifier`] - 외부 제공자 ID 토큰 검증
//! - [`CredentialAuthenticator`] - 로컬 계정 이메일/비밀번호 확인
//!
//! # Security
//!
//! - 평문 비밀번호와 해시는 로그에 남기지 않습니다
//! - 로그인 실패 메시지는 계정 존재 여부를 드러내지 않습니다
//! - ID 토큰 검증 실패의 상세 원인은 서버 로그에만 남습니다

pub mod password_hasher;
pub mod token_service;
pub mod identity_verifier;
pub mod google_verifier;
pub mod credential_authenticator;

pub use password_hasher::PasswordHasher;
pub use token_service::{TokenService, TokenSettings};
pub use identity_verifier::{IdentityVerifier, VerifierError};
pub use google_verifier::{GoogleIdTokenVerifier, GoogleVerifierSettings};
pub use credential_authenticator::CredentialAuthenticator;
