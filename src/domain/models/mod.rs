//! # Domain Models Module
//!
//! 저장되지 않는 값 객체들을 정의합니다. 엔티티와 달리 요청 하나의 수명 동안만
//! 존재합니다.
//!
//! ```text
//! models/
//! ├── auth/       ← 인증된 요청 주체, 로그인 결과
//! ├── identity/   ← 외부 제공자가 검증한 신원 정보
//! └── token/      ← 베어러 토큰 클레임
//! ```

pub mod auth;
pub mod identity;
pub mod token;

pub use auth::*;
pub use identity::*;
pub use token::*;
