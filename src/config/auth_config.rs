//! # Authentication Configuration Module
//!
//! JWT 베어러 토큰과 Google ID 토큰 검증에 필요한 설정, 그리고 계정의
//! 인증 출처([`AuthProvenance`])를 정의합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google 로그인
//! ```bash
//! export GOOGLE_CLIENT_ID="123456789-abcdefg.apps.googleusercontent.com"
//! # 선택
//! export GOOGLE_JWKS_URI="https://www.googleapis.com/oauth2/v3/certs"
//! export GOOGLE_HTTP_TIMEOUT_SECS="5"
//! export GOOGLE_JWKS_CACHE_TTL_SECS="3600"
//! export GOOGLE_JWKS_REFETCH_INTERVAL_SECS="60"
//! ```
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{GoogleOAuthConfig, JwtConfig};
//!
//! let token_service = TokenService::new(JwtConfig::token_settings());
//! let verifier = GoogleIdTokenVerifier::new(GoogleOAuthConfig::verifier_settings()?)?;
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};
use crate::services::auth::google_verifier::GoogleVerifierSettings;
use crate::services::auth::token_service::TokenSettings;

/// Google ID 토큰 검증 설정
///
/// 신뢰하는 audience는 Google Cloud Console에서 발급한 OAuth 2.0 Client ID 하나뿐입니다.
/// 이 값은 검증기 생성 시점에 명시적으로 전달되며, 테스트에서는 가짜 audience로
/// 교체할 수 있습니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID (ID 토큰의 `aud` 클레임과 비교됩니다)
    ///
    /// # Errors
    ///
    /// `GOOGLE_CLIENT_ID`가 설정되지 않았거나 비어 있으면 `InternalError`를 반환합니다.
    pub fn client_id() -> AppResult<String> {
        env::var("GOOGLE_CLIENT_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::InternalError("GOOGLE_CLIENT_ID must be set".to_string()))
    }

    /// Google 서명 키 집합(JWKS) 엔드포인트
    ///
    /// 기본값: `https://www.googleapis.com/oauth2/v3/certs`
    pub fn jwks_uri() -> String {
        env::var("GOOGLE_JWKS_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/certs".to_string())
    }

    /// ID 토큰 `iss` 클레임으로 허용하는 값들
    pub fn issuers() -> Vec<String> {
        vec![
            "accounts.google.com".to_string(),
            "https://accounts.google.com".to_string(),
        ]
    }

    /// JWKS 조회 HTTP 타임아웃 (기본값: 5초)
    pub fn http_timeout() -> Duration {
        let secs = env::var("GOOGLE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(5);

        Duration::from_secs(secs)
    }

    /// 서명 키 캐시 유지 시간 (기본값: 1시간)
    pub fn jwks_cache_ttl() -> Duration {
        let secs = env::var("GOOGLE_JWKS_CACHE_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(3600);

        Duration::from_secs(secs)
    }

    /// 모르는 `kid`로 인한 JWKS 재조회 최소 간격 (기본값: 60초)
    pub fn jwks_refetch_interval() -> Duration {
        let secs = env::var("GOOGLE_JWKS_REFETCH_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60);

        Duration::from_secs(secs)
    }

    /// 환경 변수로부터 검증기 설정을 조립합니다.
    pub fn verifier_settings() -> AppResult<GoogleVerifierSettings> {
        Ok(GoogleVerifierSettings {
            audience: Self::client_id()?,
            issuers: Self::issuers(),
            jwks_uri: Self::jwks_uri(),
            http_timeout: Self::http_timeout(),
            jwks_cache_ttl: Self::jwks_cache_ttl(),
            jwks_refetch_interval: Self::jwks_refetch_interval(),
        })
    }
}

/// JSON Web Token (JWT) 관련 설정
///
/// 서비스는 리프레시/회전 없이 단일 액세스 토큰만 발급합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 HS256 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 "your-secret-key"를 사용하지만,
    /// 이는 개발 환경에서만 안전하며 경고 로그가 출력됩니다.
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    /// 토큰 만료 시간 (시간 단위, 기본값: 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(24)
    }

    pub fn token_settings() -> TokenSettings {
        TokenSettings {
            secret: Self::secret(),
            expiration_hours: Self::expiration_hours(),
        }
    }
}

/// 계정의 인증 출처
///
/// 하나의 계정 레코드는 정확히 하나의 출처를 가집니다.
///
/// - `Local`: 이메일 + 비밀번호. 비밀번호 해시가 반드시 존재합니다.
/// - `Federated`: 외부 신원 제공자(Google) 로그인. 비밀번호 해시가 없고
///   외부 subject ID가 존재합니다.
///
/// 직렬화 형식은 `"LOCAL"` / `"FEDERATED"`입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthProvenance {
    #[default]
    Local,
    #[serde(alias = "GOOGLE")]
    Federated,
}

impl AuthProvenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvenance::Local => "LOCAL",
            AuthProvenance::Federated => "FEDERATED",
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, AuthProvenance::Local)
    }
}

impl FromStr for AuthProvenance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvenance::Local),
            "federated" | "google" => Ok(AuthProvenance::Federated),
            _ => Err(format!("Unsupported auth provenance: {}", s)),
        }
    }
}

impl fmt::Display for AuthProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provenance_from_string() {
        assert_eq!("local".parse::<AuthProvenance>().unwrap(), AuthProvenance::Local);
        assert_eq!("FEDERATED".parse::<AuthProvenance>().unwrap(), AuthProvenance::Federated);

        // 기존 데이터의 GOOGLE 표기 호환
        assert_eq!("Google".parse::<AuthProvenance>().unwrap(), AuthProvenance::Federated);

        assert!("github".parse::<AuthProvenance>().is_err());
        assert!("".parse::<AuthProvenance>().is_err());
    }

    #[test]
    fn test_auth_provenance_as_string() {
        assert_eq!(AuthProvenance::Local.as_str(), "LOCAL");
        assert_eq!(AuthProvenance::Federated.to_string(), "FEDERATED");
        assert_eq!(AuthProvenance::default(), AuthProvenance::Local);
    }

    #[test]
    fn test_auth_provenance_serialization() {
        let json = serde_json::to_string(&AuthProvenance::Federated).unwrap();
        assert_eq!(json, "\"FEDERATED\"");

        let legacy: AuthProvenance = serde_json::from_str("\"GOOGLE\"").unwrap();
        assert_eq!(legacy, AuthProvenance::Federated);
    }

    #[test]
    fn test_jwt_expiration_default() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }
    }

    #[test]
    fn test_google_defaults() {
        if env::var("GOOGLE_HTTP_TIMEOUT_SECS").is_err() {
            assert_eq!(GoogleOAuthConfig::http_timeout(), Duration::from_secs(5));
        }
        assert!(GoogleOAuthConfig::issuers().contains(&"https://accounts.google.com".to_string()));
    }
}
