//! 로컬 자격 증명 인증기
//!
//! 로그인 식별자와 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다.
//! 존재하지 않는 계정, 틀린 비밀번호, 해시가 없는 계정은 모두 같은 메시지의
//! `AuthenticationError`가 되며, 존재하지 않는 계정에 대해서도 해시 비교를 한 번
//! 수행해 응답 시간 차이를 줄입니다.

use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::Account;
use crate::repositories::AccountStore;
use crate::services::auth::password_hasher::PasswordHasher;

pub const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

pub struct CredentialAuthenticator {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    /// 계정이 없을 때 비교 대상으로 쓰는 해시
    decoy_hash: String,
}

impl CredentialAuthenticator {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> AppResult<Self> {
        let decoy_hash = hasher.hash("decoy-password-for-unknown-accounts")?;

        Ok(Self {
            store,
            hasher,
            decoy_hash,
        })
    }

    /// 자격 증명을 확인하고 일치하는 계정을 반환합니다.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError`: 계정 없음, 해시 없음, 비밀번호 불일치 (구분하지 않음)
    /// - 저장소 조회 실패 시 해당 인프라 에러
    pub async fn authenticate(&self, login_identifier: &str, password: &str) -> AppResult<Account> {
        let start_time = std::time::Instant::now();

        let account = self.store.find_by_login_identifier(login_identifier).await?;

        let stored_hash = account
            .as_ref()
            .filter(|account| account.can_authenticate_with_password())
            .and_then(|account| account.credential_hash());

        let matches = match stored_hash {
            Some(hash) => self.hasher.verify(password, hash),
            None => {
                let _ = self.hasher.verify(password, &self.decoy_hash);
                false
            }
        };

        log::debug!("Credential verification took: {:?}", start_time.elapsed());

        match account {
            Some(account) if matches => Ok(account),
            _ => Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())),
        }
    }
}
