//! 로그인 결과
//!
//! 로컬 로그인과 Google 로그인이 같은 형태로 응답합니다. 저장되지 않으며,
//! `password` 필드는 기존 클라이언트 호환을 위해 남아 있지만 항상 빈 문자열입니다.

use serde::Serialize;

use crate::domain::entities::{Account, AccountId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResult {
    account_id: Option<AccountId>,
    display_name: String,
    login_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    password: String,
    bearer_token: String,
}

impl LoginResult {
    /// 계정과 발급된 토큰(`"Bearer "` 접두사 포함)으로 결과를 만듭니다.
    pub fn for_account(account: &Account, bearer_token: String) -> Self {
        Self {
            account_id: account.id(),
            display_name: account.display_name().to_string(),
            login_identifier: account.login_identifier().to_string(),
            avatar_url: account.avatar_url().map(str::to_string),
            password: String::new(),
            bearer_token,
        }
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn login_identifier(&self) -> &str {
        &self.login_identifier
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }
}
