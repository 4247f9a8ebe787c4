//! MongoDB 계정 리포지토리
//!
//! `accounts` 컬렉션에 계정을 저장합니다. 인증과 수정 경로의 조회는 항상 MongoDB를
//! 직접 읽고, Redis에는 [`AccountStore::find_profile_by_id`]용 비밀번호 해시가 제거된
//! 프로필 사본만 캐시합니다.
//!
//! # 저장 규칙
//!
//! - 숫자형 `_id`는 `counters` 컬렉션의 `accounts` 시퀀스를 `$inc`로 증가시켜 발급합니다.
//! - `login_identifier`에는 유니크 인덱스가 걸려 있으며, 중복 키 에러(11000)는
//!   `ConflictError`로 변환됩니다. 동시에 같은 이메일로 가입해도 하나만 성공합니다.
//! - 저장할 때마다 해당 계정의 프로필 캐시 키를 무효화합니다.
//!
//! 캐시 실패는 조회 결과에 영향을 주지 않도록 로그만 남깁니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::{Account, AccountId};
use crate::repositories::accounts::account_store::AccountStore;

const COLLECTION: &str = "accounts";
const COUNTERS_COLLECTION: &str = "counters";
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct AccountRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,

    cache_ttl_seconds: u64,
}

impl AccountRepository {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>, cache_ttl_seconds: u64) -> Self {
        Self {
            db,
            redis,
            cache_ttl_seconds,
        }
    }

    fn collection(&self) -> Collection<Account> {
        self.db.collection::<Account>(COLLECTION)
    }

    fn id_cache_key(id: AccountId) -> String {
        format!("account:id:{}", id)
    }

    /// 계정 컬렉션 인덱스를 생성합니다. 시작 시 한 번 호출합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let login_index = IndexModel::builder()
            .keys(doc! { "login_identifier": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("login_identifier_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([login_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(format!("계정 인덱스 생성 실패: {}", e)))?;

        log::info!("계정 컬렉션 인덱스 확인 완료");
        Ok(())
    }

    /// `counters` 컬렉션에서 다음 계정 ID를 발급합니다.
    async fn next_id(&self) -> AppResult<AccountId> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self.db
            .collection::<Document>(COUNTERS_COLLECTION)
            .find_one_and_update(
                doc! { "_id": COLLECTION },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("계정 ID 발급 실패: {}", e)))?
            .ok_or_else(|| AppError::DatabaseError("계정 ID 시퀀스 문서가 없습니다".to_string()))?;

        let seq = counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("계정 ID 시퀀스 형식 오류: {}", e)))?;

        Ok(AccountId::new(seq))
    }

    async fn cache(&self, key: &str, profile: &Account) {
        if let Err(e) = self.redis.set_with_expiry(key, profile, self.cache_ttl_seconds).await {
            log::warn!("계정 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    async fn invalidate(&self, keys: Vec<String>) {
        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("계정 캐시 무효화 실패 ({:?}): {}", keys, e);
        }
    }
}

/// 캐시에 넣을 사본. 비밀번호 해시는 Redis에 저장하지 않습니다.
fn profile_view(account: &Account) -> Account {
    account.clone().without_credential_hash()
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

fn map_write_error(error: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&error) {
        AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_login_identifier(&self, login_identifier: &str) -> AppResult<Option<Account>> {
        self.collection()
            .find_one(doc! { "login_identifier": login_identifier })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        self.collection()
            .find_one(doc! { "_id": id.value() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_profile_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let cache_key = Self::id_cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Account>(&cache_key).await {
            return Ok(Some(cached));
        }

        let profile = self.find_by_id(id).await?.map(|account| profile_view(&account));

        if let Some(ref profile) = profile {
            self.cache(&cache_key, profile).await;
        }

        Ok(profile)
    }

    async fn save(&self, account: Account) -> AppResult<Account> {
        match account.id() {
            None => {
                let id = self.next_id().await?;
                let account = account.with_id(id);

                self.collection()
                    .insert_one(&account)
                    .await
                    .map_err(map_write_error)?;

                self.invalidate(vec![Self::id_cache_key(id)]).await;

                log::debug!("계정 생성 - ID: {}", id);
                Ok(account)
            }
            Some(id) => {
                let result = self.collection()
                    .replace_one(doc! { "_id": id.value() }, &account)
                    .await
                    .map_err(map_write_error)?;

                if result.matched_count == 0 {
                    return Err(AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", id)));
                }

                self.invalidate(vec![Self::id_cache_key(id)]).await;

                log::debug!("계정 수정 - ID: {}", id);
                Ok(account)
            }
        }
    }

    async fn exists_by_id(&self, id: AccountId) -> AppResult<bool> {
        let count = self.collection()
            .count_documents(doc! { "_id": id.value() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    async fn find_all(&self) -> AppResult<Vec<Account>> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self.collection()
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(AccountRepository::id_cache_key(AccountId::new(7)), "account:id:7");
    }

    #[test]
    fn test_cached_profile_never_carries_credential_hash() {
        let account = Account::new_local(
            "Root".to_string(),
            "root@email.com".to_string(),
            "$2b$04$hash".to_string(),
            None,
        )
        .with_id(AccountId::new(7));

        let cached = serde_json::to_value(profile_view(&account)).unwrap();

        assert!(cached.get("credential_hash").is_none());
        assert_eq!(cached["login_identifier"], "root@email.com");
        assert_eq!(account.credential_hash(), Some("$2b$04$hash"));
    }
}
