//! # Identity Service
//!
//! 계정 생성, 계정 수정, 로컬 로그인, 외부(Google) 로그인을 조율합니다.
//!
//! ## 인증 출처 상태 전이
//!
//! ```text
//! (없음) --로컬 가입-----------> LOCAL
//! (없음) --최초 Google 로그인--> FEDERATED
//! LOCAL  --Google 로그인-------> FEDERATED   (비밀번호 해시 제거)
//! ```
//!
//! 계정 수정은 출처를 바꾸지 않습니다. 출처는 항상 저장된 계정 기준으로 판단하며,
//! 외부 계정에 제출된 비밀번호는 버립니다.
//!
//! ## 동시성
//!
//! 같은 로그인 식별자에 대한 생성, 수정, 외부 로그인 upsert는 [`KeyedLock`]으로
//! 직렬화됩니다. 저장소도 유일성을 원자적으로 검사하므로 여러 인스턴스가 같은
//! 저장소를 공유하는 경우에도 중복 계정은 만들어지지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let service = IdentityService::new(store, PasswordHasher::from_config(), tokens, verifier)?;
//!
//! let account = service.create_account(NewAccount {
//!     login_identifier: "root@email.com".to_string(),
//!     display_name: "Root".to_string(),
//!     password: Some("rootroot".to_string()),
//!     ..Default::default()
//! }).await?;
//!
//! let login = service.authenticate_local(LoginCredentials {
//!     login_identifier: "root@email.com".to_string(),
//!     password: "rootroot".to_string(),
//! }).await?;
//! assert!(login.bearer_token().starts_with("Bearer "));
//! ```

use std::sync::Arc;

use validator::Validate;

use crate::config::{AuthProvenance, PasswordConfig};
use crate::core::errors::{AppError, AppResult};
use crate::core::keyed_lock::KeyedLock;
use crate::domain::dto::accounts::{AccountUpdate, LoginCredentials, NewAccount};
use crate::domain::entities::{Account, AccountId};
use crate::domain::models::auth::LoginResult;
use crate::repositories::AccountStore;
use crate::services::auth::credential_authenticator::INVALID_CREDENTIALS;
use crate::services::auth::{
    CredentialAuthenticator, IdentityVerifier, PasswordHasher, TokenService,
};
use crate::utils::string_utils::{
    clean_optional_string, is_valid_string, normalize_login_identifier, truncate_chars,
};

const MAX_DISPLAY_NAME_CHARS: usize = 255;
const MAX_AVATAR_URL_CHARS: usize = 5000;

pub const INVALID_OR_EXPIRED_TOKEN: &str = "유효하지 않거나 만료된 토큰입니다";
pub const UNVERIFIABLE_TOKEN: &str = "토큰을 검증할 수 없습니다";

pub struct IdentityService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    authenticator: CredentialAuthenticator,
    tokens: Arc<TokenService>,
    verifier: Arc<dyn IdentityVerifier>,
    identifier_locks: KeyedLock,
}

fn validation_error(errors: validator::ValidationErrors) -> AppError {
    AppError::ValidationError(errors.to_string())
}

fn check_password_length(password: &str) -> AppResult<()> {
    if password.chars().count() < PasswordConfig::min_password_length() {
        return Err(AppError::ValidationError(format!(
            "비밀번호는 최소 {}자 이상이어야 합니다",
            PasswordConfig::min_password_length()
        )));
    }
    Ok(())
}

impl IdentityService {
    /// # Errors
    ///
    /// 자격 증명 인증기 초기화(비교용 해시 생성) 실패 시 `InternalError`
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> AppResult<Self> {
        let authenticator = CredentialAuthenticator::new(store.clone(), hasher.clone())?;

        Ok(Self {
            store,
            hasher,
            authenticator,
            tokens,
            verifier,
            identifier_locks: KeyedLock::new(),
        })
    }

    /// 새 계정을 생성합니다.
    ///
    /// 1. 출처가 없으면 `LOCAL`
    /// 2. `LOCAL`은 8자 이상의 비밀번호 필수, `FEDERATED`는 외부 subject ID 필수
    /// 3. 로그인 식별자 중복 검사 (해시 계산 및 저장 전)
    /// 4. `LOCAL`만 비밀번호를 해시로 저장하고, `FEDERATED`에 제출된 비밀번호는 버림
    /// 5. 식별자는 저장소가 새로 부여
    ///
    /// # Errors
    ///
    /// - `ValidationError`: 입력 형식 오류, 비밀번호 누락/공백/8자 미만
    /// - `ConflictError`: 이미 사용 중인 로그인 식별자
    pub async fn create_account(&self, request: NewAccount) -> AppResult<Account> {
        let start_time = std::time::Instant::now();

        let request = NewAccount {
            login_identifier: normalize_login_identifier(&request.login_identifier),
            display_name: request.display_name.trim().to_string(),
            ..request
        };
        request.validate().map_err(validation_error)?;

        let provenance = request.auth_provenance.unwrap_or_default();

        let credential = match provenance {
            AuthProvenance::Local => {
                let password = request
                    .password
                    .filter(|password| is_valid_string(password))
                    .ok_or_else(|| AppError::ValidationError("비밀번호를 입력해주세요".to_string()))?;
                check_password_length(&password)?;
                Some(password)
            }
            AuthProvenance::Federated => {
                if request.password.is_some() {
                    log::debug!("외부 계정 생성 요청의 비밀번호는 무시됩니다");
                }
                None
            }
        };

        let external_subject_id = clean_optional_string(request.external_subject_id);
        if provenance == AuthProvenance::Federated && external_subject_id.is_none() {
            return Err(AppError::ValidationError(
                "외부 계정에는 외부 subject ID가 필요합니다".to_string(),
            ));
        }

        let _guard = self.identifier_locks.acquire(&request.login_identifier).await;

        if self.store.find_by_login_identifier(&request.login_identifier).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let account = match (credential, external_subject_id) {
            (Some(password), _) => Account::new_local(
                request.display_name,
                request.login_identifier,
                self.hasher.hash(&password)?,
                request.avatar_url,
            ),
            (None, Some(subject)) => Account::new_federated(
                request.display_name,
                request.login_identifier,
                subject,
                request.avatar_url,
            ),
            (None, None) => {
                return Err(AppError::InternalError("계정 자격 증명을 결정할 수 없습니다".to_string()));
            }
        };

        let created = self.store.save(account).await?;

        log::info!(
            "계정 생성 완료 - ID: {:?}, 출처: {}, 소요: {:?}",
            created.id(),
            created.auth_provenance(),
            start_time.elapsed()
        );

        Ok(created)
    }

    /// 기존 계정의 프로필(이름, 로그인 식별자, 아바타)과 비밀번호를 수정합니다.
    ///
    /// - 다른 계정(식별자 값이 다른 계정)이 같은 로그인 식별자를 쓰면 충돌
    /// - `LOCAL` 계정에 새 비밀번호가 오면 해시로 교체, 비어 있으면 기존 해시 유지
    /// - `FEDERATED` 계정에 제출된 비밀번호는 버리고 기존 상태(해시 없음) 유지
    /// - 출처와 외부 subject ID는 그대로 유지
    ///
    /// # Errors
    ///
    /// - `ValidationError`: 입력 형식 오류, 8자 미만의 새 비밀번호
    /// - `NotFound`: 존재하지 않는 계정
    /// - `ConflictError`: 다른 계정이 사용 중인 로그인 식별자
    pub async fn update_account(&self, update: AccountUpdate) -> AppResult<Account> {
        let update = AccountUpdate {
            login_identifier: normalize_login_identifier(&update.login_identifier),
            display_name: update.display_name.trim().to_string(),
            ..update
        };
        update.validate().map_err(validation_error)?;

        if !self.store.exists_by_id(update.id).await? {
            return Err(AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", update.id)));
        }

        let _guard = self.identifier_locks.acquire(&update.login_identifier).await;

        if let Some(owner) = self.store.find_by_login_identifier(&update.login_identifier).await? {
            if owner.id() != Some(update.id) {
                return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
            }
        }

        let current = self.store.find_by_id(update.id).await?
            .ok_or_else(|| AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", update.id)))?;

        let password = update.password.filter(|password| is_valid_string(password));
        let provenance = current.auth_provenance();

        let mut next = current.with_profile(update.display_name, update.login_identifier, update.avatar_url);

        match (provenance, password) {
            (AuthProvenance::Local, Some(password)) => {
                check_password_length(&password)?;
                next = next.with_credential_hash(self.hasher.hash(&password)?);
            }
            (AuthProvenance::Federated, Some(_)) => {
                log::debug!("외부 계정 {}의 비밀번호 변경 요청은 무시됩니다", update.id);
            }
            (_, None) => {}
        }

        let updated = self.store.save(next).await?;

        log::info!("계정 수정 완료 - ID: {}", update.id);
        Ok(updated)
    }

    /// 이메일과 비밀번호로 로그인합니다.
    ///
    /// 비밀번호 확인 후 식별자 잠금을 잡고 계정을 다시 읽어, 확인 도중 외부 로그인으로
    /// 전환된 계정에는 토큰을 발급하지 않습니다.
    ///
    /// # Errors
    ///
    /// - `ValidationError`: 이메일 또는 비밀번호 누락
    /// - `AuthenticationError`: 자격 증명 불일치, 외부 제공자 계정
    pub async fn authenticate_local(&self, credentials: LoginCredentials) -> AppResult<LoginResult> {
        credentials.validate().map_err(validation_error)?;

        let login_identifier = normalize_login_identifier(&credentials.login_identifier);

        self.authenticator
            .authenticate(&login_identifier, &credentials.password)
            .await?;

        let _guard = self.identifier_locks.acquire(&login_identifier).await;

        let account = self.store.find_by_login_identifier(&login_identifier).await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if account.auth_provenance() != AuthProvenance::Local {
            return Err(AppError::AuthenticationError(
                "외부 제공자 계정입니다. Google 로그인을 이용해주세요".to_string(),
            ));
        }

        let bearer_token = self.tokens.issue(&account)?;

        log::info!("로컬 로그인 성공 - 계정 ID: {:?}", account.id());
        Ok(LoginResult::for_account(&account, bearer_token))
    }

    /// 외부 제공자(Google) ID 토큰으로 로그인합니다.
    ///
    /// 처음 보는 이메일이면 `FEDERATED` 계정을 만들고, 이미 있으면 이름과 아바타를
    /// 갱신합니다. 기존 `LOCAL` 계정은 `FEDERATED`로 전환되며 비밀번호 해시가 제거됩니다.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError`: 토큰 검증 실패 또는 신원 확인 불가
    pub async fn authenticate_federated(&self, assertion: &str) -> AppResult<LoginResult> {
        let identity = match self.verifier.verify(assertion).await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                log::warn!("외부 ID 토큰에서 신원을 확인할 수 없음");
                return Err(AppError::AuthenticationError(UNVERIFIABLE_TOKEN.to_string()));
            }
            Err(e) => {
                log::warn!("외부 ID 토큰 검증 실패: {}", e);
                return Err(AppError::AuthenticationError(INVALID_OR_EXPIRED_TOKEN.to_string()));
            }
        };

        let login_identifier = normalize_login_identifier(&identity.email);
        let display_name = clean_optional_string(identity.display_name)
            .map(|name| truncate_chars(&name, MAX_DISPLAY_NAME_CHARS));
        let avatar_url = clean_optional_string(identity.avatar_url)
            .filter(|avatar| avatar.chars().count() <= MAX_AVATAR_URL_CHARS);

        let _guard = self.identifier_locks.acquire(&login_identifier).await;

        let account = match self.store.find_by_login_identifier(&login_identifier).await? {
            Some(existing) => {
                if existing.is_local() {
                    log::warn!(
                        "로컬 계정을 외부 계정으로 전환합니다 - 계정 ID: {:?}",
                        existing.id()
                    );
                }
                existing.federated_refresh(identity.external_subject_id, display_name, avatar_url)
            }
            None => {
                let display_name = display_name
                    .unwrap_or_else(|| truncate_chars(&login_identifier, MAX_DISPLAY_NAME_CHARS));
                Account::new_federated(
                    display_name,
                    login_identifier.clone(),
                    identity.external_subject_id,
                    avatar_url,
                )
            }
        };

        let account = self.store.save(account).await?;
        let bearer_token = self.tokens.issue(&account)?;

        log::info!("외부 로그인 성공 - 계정 ID: {:?}", account.id());
        Ok(LoginResult::for_account(&account, bearer_token))
    }

    /// 비밀번호 해시가 제거된 계정 프로필을 조회합니다.
    ///
    /// # Errors
    ///
    /// 존재하지 않는 계정이면 `NotFound`
    pub async fn find_account(&self, id: AccountId) -> AppResult<Account> {
        self.store
            .find_profile_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", id)))
    }

    pub async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.store.find_all().await
    }
}
