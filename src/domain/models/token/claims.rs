use serde::{Deserialize, Serialize};

use crate::config::AuthProvenance;

/// 베어러 토큰(JWT) 클레임
///
/// - `sub`: 계정의 로그인 식별자(이메일)
/// - `provenance`: 토큰 발급 당시 계정의 인증 출처
/// - `iat` / `exp`: 발급 및 만료 시각 (Unix timestamp, 초)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub provenance: AuthProvenance,
    pub iat: i64,
    pub exp: i64,
}
