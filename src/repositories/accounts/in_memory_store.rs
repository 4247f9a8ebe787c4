//! 메모리 기반 계정 저장소
//!
//! 하나의 쓰기 잠금 안에서 유일성 검사와 삽입을 함께 수행하므로, 동시에 같은
//! 로그인 식별자로 저장하는 요청 중 하나만 성공합니다.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Account, AccountId};
use crate::repositories::accounts::account_store::AccountStore;

struct StoreState {
    accounts: BTreeMap<AccountId, Account>,
    next_id: i64,
}

pub struct InMemoryAccountStore {
    state: RwLock<StoreState>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::with_first_id(1)
    }

    /// 첫 번째로 부여할 식별자를 지정합니다.
    pub fn with_first_id(first_id: i64) -> Self {
        Self {
            state: RwLock::new(StoreState {
                accounts: BTreeMap::new(),
                next_id: first_id,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|state| state.accounts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("계정 저장소 잠금이 손상되었습니다".to_string())
}

fn identifier_taken(state: &StoreState, login_identifier: &str, except: Option<AccountId>) -> bool {
    state.accounts.values().any(|existing| {
        existing.login_identifier() == login_identifier && existing.id() != except
    })
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_login_identifier(&self, login_identifier: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().map_err(poisoned)?;

        Ok(state
            .accounts
            .values()
            .find(|account| account.login_identifier() == login_identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn save(&self, account: Account) -> AppResult<Account> {
        let mut state = self.state.write().map_err(poisoned)?;

        if identifier_taken(&state, account.login_identifier(), account.id()) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let account = match account.id() {
            Some(id) => {
                if !state.accounts.contains_key(&id) {
                    return Err(AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", id)));
                }
                account
            }
            None => {
                let id = AccountId::new(state.next_id);
                state.next_id += 1;
                account.with_id(id)
            }
        };

        if let Some(id) = account.id() {
            state.accounts.insert(id, account.clone());
        }

        Ok(account)
    }

    async fn exists_by_id(&self, id: AccountId) -> AppResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.accounts.contains_key(&id))
    }

    async fn find_all(&self) -> AppResult<Vec<Account>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.accounts.values().cloned().collect())
    }
}
