//! 계정 저장소 계약

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::entities::{Account, AccountId};

/// 계정 영구 저장소
///
/// 구현체는 로그인 식별자 유일성을 원자적으로 보장해야 합니다. 같은 식별자를
/// 가진 다른 계정이 이미 있으면 `save`는 `AppError::ConflictError`를 반환합니다.
/// 로그인 식별자는 호출자가 정규화(소문자, 공백 제거)해서 전달합니다.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_login_identifier(&self, login_identifier: &str) -> AppResult<Option<Account>>;

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// 비밀번호 해시가 제거된 프로필 조회
    ///
    /// 인증이나 수정 판단에는 쓰지 않습니다. 캐시를 두는 구현은 이 메서드만 캐시를
    /// 거치며, 위의 조회 메서드는 항상 저장소의 현재 상태를 반환해야 합니다.
    async fn find_profile_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.find_by_id(id).await?.map(Account::without_credential_hash))
    }

    /// `id`가 없으면 새 식별자를 부여해 삽입하고, 있으면 기존 계정을 교체합니다.
    ///
    /// # Errors
    ///
    /// - `ConflictError`: 다른 계정이 같은 로그인 식별자를 사용 중
    /// - `NotFound`: 교체 대상 계정이 없음
    async fn save(&self, account: Account) -> AppResult<Account>;

    async fn exists_by_id(&self, id: AccountId) -> AppResult<bool>;

    /// 식별자 오름차순 전체 목록
    async fn find_all(&self) -> AppResult<Vec<Account>>;
}
