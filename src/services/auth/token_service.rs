//! # Token Service
//!
//! 로그인에 성공한 계정에게 HS256 서명된 JWT를 발급하고, 보호된 라우트에서
//! 같은 토큰을 검증합니다.
//!
//! 발급 형식은 `"Bearer " + <JWT>`이며, subject는 계정의 로그인 식별자(이메일)입니다.
//! 토큰 갱신이나 폐기 목록은 없습니다. 만료 시간이 지나면 다시 로그인해야 합니다.
//!
//! ```rust,ignore
//! let tokens = TokenService::new(JwtConfig::token_settings());
//!
//! let bearer = tokens.issue(&account)?;          // "Bearer eyJhbGciOi..."
//! let raw = tokens.extract_bearer_token(&bearer)?;
//! let claims = tokens.verify_token(raw)?;
//! assert_eq!(claims.sub, account.login_identifier());
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::AuthProvenance;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::Account;
use crate::domain::models::token::TokenClaims;

pub const BEARER_PREFIX: &str = "Bearer ";

/// 토큰 서비스 생성 설정
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub expiration_hours: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(settings: TokenSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            expiration_hours: settings.expiration_hours,
        }
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    /// 계정에 대한 베어러 토큰을 발급합니다.
    ///
    /// # Returns
    ///
    /// `"Bearer "` 접두사가 붙은 서명된 JWT
    pub fn issue(&self, account: &Account) -> AppResult<String> {
        self.issue_for(account.login_identifier(), account.auth_provenance())
    }

    pub fn issue_for(&self, subject: &str, provenance: AuthProvenance) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = TokenClaims {
            sub: subject.to_string(),
            provenance,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok(format!("{}{}", BEARER_PREFIX, token))
    }

    /// 접두사 없는 JWT를 검증하고 클레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// 만료, 서명 불일치, 형식 오류 모두 `AuthenticationError`
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => {
                    log::debug!("베어러 토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        auth_header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenSettings {
            secret: "test-secret".to_string(),
            expiration_hours: 24,
        })
    }

    #[test]
    fn test_issue_produces_bearer_token_with_subject() {
        let tokens = service();

        let bearer = tokens.issue_for("root@email.com", AuthProvenance::Local).unwrap();
        assert!(bearer.starts_with("Bearer "));

        let claims = tokens.verify_token(tokens.extract_bearer_token(&bearer).unwrap()).unwrap();
        assert_eq!(claims.sub, "root@email.com");
        assert_eq!(claims.provenance, AuthProvenance::Local);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new(TokenSettings {
            secret: "other-secret".to_string(),
            expiration_hours: 24,
        });
        let bearer = other.issue_for("root@email.com", AuthProvenance::Local).unwrap();

        let tokens = service();
        let result = tokens.verify_token(tokens.extract_bearer_token(&bearer).unwrap());

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = TokenClaims {
            sub: "root@email.com".to_string(),
            provenance: AuthProvenance::Local,
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();

        match service().verify_token(&token) {
            Err(AppError::AuthenticationError(msg)) => assert!(msg.contains("만료")),
            other => panic!("expected expired token error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        let tokens = service();

        assert_eq!(tokens.extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(tokens.extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(tokens.extract_bearer_token("Bearer ").is_err());
        assert!(tokens.extract_bearer_token("abc.def.ghi").is_err());
    }
}
