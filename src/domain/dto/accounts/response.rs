use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::AuthProvenance;
use crate::domain::entities::{Account, AccountId};

/// 계정 응답 (비밀번호 해시는 포함하지 않음)
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    pub display_name: String,
    pub login_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub auth_provenance: AuthProvenance,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            display_name: account.display_name().to_string(),
            login_identifier: account.login_identifier().to_string(),
            avatar_url: account.avatar_url().map(str::to_string),
            auth_provenance: account.auth_provenance(),
            created_at: account.created_at(),
            updated_at: account.updated_at(),
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}
