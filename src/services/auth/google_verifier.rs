//! # Google ID Token Verifier
//!
//! 클라이언트(Google Identity Services)가 받은 ID 토큰을 서버에서 검증합니다.
//!
//! ## 검증 절차
//!
//! 1. JWT 헤더 디코딩, `kid` 추출, 알고리즘이 RS256인지 확인
//! 2. `kid`에 해당하는 Google 공개키를 캐시 또는 JWKS 엔드포인트에서 조회
//! 3. RS256 서명, `iss`, `aud`(설정된 Client ID 하나), `exp` 검증
//! 4. `email`, `name`, `picture`, `sub` 클레임 추출
//!
//! 서명 키는 `jwks_cache_ttl` 동안 캐시하며, 캐시에 없는 `kid`가 오면 다시
//! 조회합니다(키 순환 대응). 캐시가 유효한 동안의 재조회는 `jwks_refetch_interval`에
//! 한 번으로 제한되고, 그 사이에 온 모르는 `kid`는 네트워크 요청 없이 검증 불가로
//! 처리됩니다. JWKS 요청에는 `http_timeout`이 적용됩니다.
//!
//! 헤더부터 해석할 수 없는 토큰은 네트워크 요청 없이 거절됩니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;

use crate::core::errors::{AppResult, ErrorContext};
use crate::domain::models::identity::VerifiedIdentity;
use crate::services::auth::identity_verifier::{IdentityVerifier, VerifierError};

/// 검증기 생성 설정
#[derive(Debug, Clone)]
pub struct GoogleVerifierSettings {
    /// 신뢰하는 audience (OAuth Client ID)
    pub audience: String,
    pub issuers: Vec<String>,
    pub jwks_uri: String,
    pub http_timeout: Duration,
    pub jwks_cache_ttl: Duration,
    /// 캐시가 유효할 때 모르는 `kid`로 JWKS를 다시 조회하는 최소 간격
    pub jwks_refetch_interval: Duration,
}

/// JWKS 응답
#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<GoogleJwk>,
}

/// Google 서명 키 하나
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleJwk {
    pub kid: String,
    /// RSA modulus (Base64URL)
    pub n: String,
    /// RSA exponent (Base64URL)
    pub e: String,
}

#[derive(Debug, Deserialize)]
struct GoogleIdTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl GoogleIdTokenClaims {
    /// 제공자가 명시적으로 미인증이라고 표시한 경우에만 `false`
    ///
    /// Google은 `email_verified`를 bool 또는 `"true"` 문자열로 보냅니다.
    fn email_not_verified(&self) -> bool {
        match &self.email_verified {
            Some(serde_json::Value::Bool(verified)) => !verified,
            Some(serde_json::Value::String(verified)) => !verified.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

#[derive(Default)]
struct JwksCache {
    keys: HashMap<String, GoogleJwk>,
    fetched_at: Option<Instant>,
    /// 마지막 조회 시도 시각 (실패 포함)
    attempted_at: Option<Instant>,
}

impl JwksCache {
    fn is_expired(&self, ttl: Duration) -> bool {
        match self.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() > ttl,
            None => true,
        }
    }

    fn may_refetch(&self, ttl: Duration, interval: Duration) -> bool {
        self.is_expired(ttl) || self.attempted_at.is_none_or(|attempted_at| attempted_at.elapsed() >= interval)
    }

    fn replace(&mut self, keys: Vec<GoogleJwk>) {
        self.keys = keys.into_iter().map(|key| (key.kid.clone(), key)).collect();
        self.fetched_at = Some(Instant::now());
    }
}

pub struct GoogleIdTokenVerifier {
    settings: GoogleVerifierSettings,
    http: Client,
    cache: RwLock<JwksCache>,
}

impl GoogleIdTokenVerifier {
    /// # Errors
    ///
    /// HTTP 클라이언트 생성 실패 시 `InternalError`
    pub fn new(settings: GoogleVerifierSettings) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(settings.http_timeout)
            .build()
            .with_context(|| format!("HTTP 클라이언트 생성 실패 (timeout: {:?})", settings.http_timeout))?;

        Ok(Self {
            settings,
            http,
            cache: RwLock::new(JwksCache::default()),
        })
    }

    /// 서명 키를 미리 채운 상태로 생성합니다. TTL이 지나면 정상적으로 다시 조회합니다.
    pub fn with_keys(settings: GoogleVerifierSettings, keys: Vec<GoogleJwk>) -> AppResult<Self> {
        let verifier = Self::new(settings)?;
        if let Ok(mut cache) = verifier.cache.write() {
            cache.replace(keys);
        }
        Ok(verifier)
    }

    pub fn audience(&self) -> &str {
        &self.settings.audience
    }

    async fn fetch_jwks(&self) -> Result<Vec<GoogleJwk>, VerifierError> {
        log::debug!("Google JWKS 조회: {}", self.settings.jwks_uri);

        let response = self.http
            .get(&self.settings.jwks_uri)
            .send()
            .await
            .map_err(|e| VerifierError::KeySetUnavailable(format!("JWKS 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(VerifierError::KeySetUnavailable(format!(
                "JWKS 응답 상태 코드: {}",
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| VerifierError::KeySetUnavailable(format!("JWKS 파싱 실패: {}", e)))?;

        log::info!("Google 공개키 {}개 조회 완료", jwks.keys.len());
        Ok(jwks.keys)
    }

    fn cached_key(&self, kid: &str) -> Option<GoogleJwk> {
        let cache = self.cache.read().ok()?;
        if cache.is_expired(self.settings.jwks_cache_ttl) {
            return None;
        }
        cache.keys.get(kid).cloned()
    }

    /// 재조회가 허용되면 시도 시각을 기록하고 `true`
    fn begin_refetch(&self) -> bool {
        let Ok(mut cache) = self.cache.write() else {
            return true;
        };
        if !cache.may_refetch(self.settings.jwks_cache_ttl, self.settings.jwks_refetch_interval) {
            return false;
        }
        cache.attempted_at = Some(Instant::now());
        true
    }

    /// `kid`에 해당하는 공개키. 새로 조회한 키 집합에도 없거나 재조회 간격 이내면 `None`
    async fn signing_key(&self, kid: &str) -> Result<Option<GoogleJwk>, VerifierError> {
        if let Some(key) = self.cached_key(kid) {
            return Ok(Some(key));
        }

        if !self.begin_refetch() {
            log::debug!("JWKS 재조회 간격 이내, 조회 생략 - kid: {}", kid);
            return Ok(None);
        }

        let keys = self.fetch_jwks().await?;
        let found = keys.iter().find(|key| key.kid == kid).cloned();

        if let Ok(mut cache) = self.cache.write() {
            cache.replace(keys);
        }

        Ok(found)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&self.settings.issuers);
        validation.set_audience(&[self.settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdTokenVerifier {
    async fn verify(&self, assertion: &str) -> Result<Option<VerifiedIdentity>, VerifierError> {
        let header = decode_header(assertion)
            .map_err(|e| VerifierError::Malformed(format!("헤더 디코딩 실패: {}", e)))?;

        if header.alg != Algorithm::RS256 {
            return Err(VerifierError::Rejected(format!("지원하지 않는 알고리즘: {:?}", header.alg)));
        }

        let kid = header
            .kid
            .ok_or_else(|| VerifierError::Malformed("kid 누락".to_string()))?;

        let Some(jwk) = self.signing_key(&kid).await? else {
            log::warn!("Google 공개키를 찾을 수 없음 - kid: {}", kid);
            return Ok(None);
        };

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| VerifierError::Rejected(format!("공개키 형식 오류: {}", e)))?;

        let claims = decode::<GoogleIdTokenClaims>(assertion, &decoding_key, &self.validation())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerifierError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    VerifierError::Rejected("서명 불일치".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    VerifierError::Rejected("issuer 불일치".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    VerifierError::Rejected("audience 불일치".to_string())
                }
                _ => VerifierError::Rejected(e.to_string()),
            })?;

        if claims.email_not_verified() {
            log::warn!("이메일 미인증 Google 계정 - sub: {}", claims.sub);
            return Ok(None);
        }

        let Some(email) = claims.email.filter(|email| !email.trim().is_empty()) else {
            log::warn!("이메일 클레임 없는 Google ID 토큰 - sub: {}", claims.sub);
            return Ok(None);
        };

        log::debug!("Google ID 토큰 검증 성공 - sub: {}", claims.sub);

        Ok(Some(VerifiedIdentity {
            email,
            display_name: claims.name,
            avatar_url: claims.picture,
            external_subject_id: claims.sub,
        }))
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    //! 테스트용 RSA 키와 Google 형식 ID 토큰 생성기

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    use actix_web::dev::ServerHandle;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::traits::PublicKeyParts;
    use rsa::RsaPrivateKey;

    use super::*;

    pub const KID: &str = "test-key-1";
    pub const AUDIENCE: &str = "blog-client-id.apps.googleusercontent.com";

    pub struct TestKey {
        pub encoding_key: EncodingKey,
        pub jwk: GoogleJwk,
    }

    pub fn test_key() -> &'static TestKey {
        static KEY: OnceLock<TestKey> = OnceLock::new();

        KEY.get_or_init(|| {
            let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).unwrap();
            let pem = private_key.to_pkcs1_pem(rsa::pkcs1::LineEnding::LF).unwrap();
            let public_key = private_key.to_public_key();

            TestKey {
                encoding_key: EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap(),
                jwk: GoogleJwk {
                    kid: KID.to_string(),
                    n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
                    e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
                },
            }
        })
    }

    pub fn settings(jwks_uri: &str) -> GoogleVerifierSettings {
        GoogleVerifierSettings {
            audience: AUDIENCE.to_string(),
            issuers: vec![
                "accounts.google.com".to_string(),
                "https://accounts.google.com".to_string(),
            ],
            jwks_uri: jwks_uri.to_string(),
            http_timeout: Duration::from_secs(2),
            jwks_cache_ttl: Duration::from_secs(3600),
            jwks_refetch_interval: Duration::from_secs(60),
        }
    }

    /// 테스트 키 하나를 내려주는 로컬 JWKS 엔드포인트
    pub struct JwksServer {
        pub uri: String,
        pub hits: Arc<AtomicUsize>,
        handle: ServerHandle,
    }

    impl JwksServer {
        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub async fn stop(self) {
            self.handle.stop(false).await;
        }
    }

    /// 요청마다 `delay`만큼 기다린 뒤 응답하는 JWKS 서버를 띄웁니다.
    pub fn spawn_jwks_server(delay: Duration) -> JwksServer {
        let body = serde_json::json!({
            "keys": [{
                "kid": KID,
                "kty": "RSA",
                "alg": "RS256",
                "use": "sig",
                "n": test_key().jwk.n,
                "e": test_key().jwk.e,
            }]
        })
        .to_string();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let server = HttpServer::new(move || {
            let body = body.clone();
            let counter = counter.clone();
            App::new().route(
                "/oauth2/v3/certs",
                web::get().to(move || {
                    let body = body.clone();
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        actix_web::rt::time::sleep(delay).await;
                        HttpResponse::Ok()
                            .content_type("application/json")
                            .body(body)
                    }
                }),
            )
        })
        .workers(1)
        .shutdown_timeout(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        JwksServer {
            uri: format!("http://{}/oauth2/v3/certs", addr),
            hits,
            handle,
        }
    }

    /// 기본값으로 유효한 클레임
    pub fn claims(email: &str) -> serde_json::Value {
        let now = chrono::Utc::now().timestamp();
        serde_json::json!({
            "iss": "https://accounts.google.com",
            "aud": AUDIENCE,
            "sub": "google-sub-1",
            "email": email,
            "email_verified": true,
            "name": "Google User",
            "picture": "https://lh3.googleusercontent.com/a/photo",
            "iat": now,
            "exp": now + 3600,
        })
    }

    pub fn sign(kid: &str, claims: &serde_json::Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        encode(&header, claims, &test_key().encoding_key).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_keys::*;
    use super::*;

    const UNREACHABLE_JWKS: &str = "http://127.0.0.1:9/oauth2/v3/certs";

    fn preloaded_verifier() -> GoogleIdTokenVerifier {
        GoogleIdTokenVerifier::with_keys(settings(UNREACHABLE_JWKS), vec![test_key().jwk.clone()]).unwrap()
    }

    #[actix_web::test]
    async fn test_garbage_token_is_malformed() {
        let verifier = preloaded_verifier();

        let result = verifier.verify("garbage-token").await;

        assert!(matches!(result, Err(VerifierError::Malformed(_))));
    }

    #[actix_web::test]
    async fn test_valid_token_yields_identity() {
        let verifier = preloaded_verifier();
        let token = sign(KID, &claims("user@gmail.com"));

        let identity = verifier.verify(&token).await.unwrap().unwrap();

        assert_eq!(identity.email, "user@gmail.com");
        assert_eq!(identity.display_name.as_deref(), Some("Google User"));
        assert_eq!(identity.avatar_url.as_deref(), Some("https://lh3.googleusercontent.com/a/photo"));
        assert_eq!(identity.external_subject_id, "google-sub-1");
    }

    #[actix_web::test]
    async fn test_wrong_audience_is_rejected() {
        let verifier = preloaded_verifier();
        let mut claims = claims("user@gmail.com");
        claims["aud"] = serde_json::json!("someone-else.apps.googleusercontent.com");

        let result = verifier.verify(&sign(KID, &claims)).await;

        assert!(matches!(result, Err(VerifierError::Rejected(_))));
    }

    #[actix_web::test]
    async fn test_wrong_issuer_is_rejected() {
        let verifier = preloaded_verifier();
        let mut claims = claims("user@gmail.com");
        claims["iss"] = serde_json::json!("https://evil.example.com");

        let result = verifier.verify(&sign(KID, &claims)).await;

        assert!(matches!(result, Err(VerifierError::Rejected(_))));
    }

    #[actix_web::test]
    async fn test_expired_token_is_rejected() {
        let verifier = preloaded_verifier();
        let mut claims = claims("user@gmail.com");
        let now = chrono::Utc::now().timestamp();
        claims["iat"] = serde_json::json!(now - 7200);
        claims["exp"] = serde_json::json!(now - 3600);

        let result = verifier.verify(&sign(KID, &claims)).await;

        assert!(matches!(result, Err(VerifierError::Expired)));
    }

    #[actix_web::test]
    async fn test_unverified_email_yields_none() {
        let verifier = preloaded_verifier();
        let mut claims = claims("user@gmail.com");
        claims["email_verified"] = serde_json::json!("false");

        assert_eq!(verifier.verify(&sign(KID, &claims)).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_missing_email_yields_none() {
        let verifier = preloaded_verifier();
        let mut claims = claims("user@gmail.com");
        claims.as_object_mut().unwrap().remove("email");

        assert_eq!(verifier.verify(&sign(KID, &claims)).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_unknown_kid_with_unreachable_jwks_fails() {
        let verifier = preloaded_verifier();
        let token = sign("rotated-key", &claims("user@gmail.com"));

        let result = verifier.verify(&token).await;

        assert!(matches!(result, Err(VerifierError::KeySetUnavailable(_))));
    }

    #[actix_web::test]
    async fn test_keys_fetched_from_jwks_endpoint() {
        let server = spawn_jwks_server(Duration::ZERO);
        let verifier = GoogleIdTokenVerifier::new(settings(&server.uri)).unwrap();

        let identity = verifier.verify(&sign(KID, &claims("user@gmail.com"))).await.unwrap();
        assert_eq!(identity.map(|identity| identity.email), Some("user@gmail.com".to_string()));

        // 새로 받은 키 집합에도 없는 kid는 검증 불가
        let unknown = verifier.verify(&sign("unknown-kid", &claims("user@gmail.com"))).await.unwrap();
        assert_eq!(unknown, None);
        assert_eq!(server.hits(), 1);

        server.stop().await;
    }

    #[actix_web::test]
    async fn test_unknown_kids_refetch_at_most_once_per_interval() {
        let server = spawn_jwks_server(Duration::ZERO);
        let verifier = GoogleIdTokenVerifier::with_keys(settings(&server.uri), vec![test_key().jwk.clone()]).unwrap();

        for kid in ["forged-1", "forged-2", "forged-3"] {
            let result = verifier.verify(&sign(kid, &claims("user@gmail.com"))).await.unwrap();
            assert_eq!(result, None);
        }
        assert_eq!(server.hits(), 1);

        let identity = verifier.verify(&sign(KID, &claims("user@gmail.com"))).await.unwrap();
        assert!(identity.is_some());
        assert_eq!(server.hits(), 1);

        server.stop().await;
    }

    #[actix_web::test]
    async fn test_zero_refetch_interval_refetches_every_unknown_kid() {
        let server = spawn_jwks_server(Duration::ZERO);
        let settings = GoogleVerifierSettings {
            jwks_refetch_interval: Duration::ZERO,
            ..settings(&server.uri)
        };
        let verifier = GoogleIdTokenVerifier::with_keys(settings, vec![test_key().jwk.clone()]).unwrap();

        verifier.verify(&sign("rotated-1", &claims("user@gmail.com"))).await.unwrap();
        verifier.verify(&sign("rotated-2", &claims("user@gmail.com"))).await.unwrap();

        assert_eq!(server.hits(), 2);

        server.stop().await;
    }

    #[actix_web::test]
    async fn test_slow_jwks_endpoint_is_cut_off_by_timeout() {
        let server = spawn_jwks_server(Duration::from_secs(2));
        let settings = GoogleVerifierSettings {
            http_timeout: Duration::from_millis(200),
            ..settings(&server.uri)
        };
        let verifier = GoogleIdTokenVerifier::new(settings).unwrap();

        let started = Instant::now();
        let result = verifier.verify(&sign(KID, &claims("user@gmail.com"))).await;

        assert!(matches!(result, Err(VerifierError::KeySetUnavailable(_))));
        assert!(started.elapsed() < Duration::from_millis(1500));

        server.stop().await;
    }
}
