//! 계정 엔티티
//!
//! 블로그 사용자 한 명의 신원 레코드입니다. 로컬(이메일 + 비밀번호) 계정과
//! 외부 제공자(Google) 계정이 같은 구조를 공유하며, [`AuthProvenance`]로 구분됩니다.
//!
//! # 불변 조건
//!
//! - `LOCAL` 계정은 비어 있지 않은 비밀번호 해시를 가집니다.
//! - `FEDERATED` 계정은 비밀번호 해시가 없고, 외부 subject ID를 가집니다.
//! - `id`는 저장소가 최초 저장 시 부여하며 이후 바뀌지 않습니다.
//!
//! 필드는 모두 비공개이며 읽기 전용 접근자만 공개됩니다. 상태 변경은
//! 새 값을 반환하는 크레이트 내부 메서드로만 이루어지므로, 호출자가 가진
//! `Account` 값은 변하지 않습니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvenance;

/// 저장소가 부여하는 숫자형 계정 식별자
///
/// 항상 값으로 비교됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<AccountId>,
    display_name: String,
    login_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credential_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    auth_provenance: AuthProvenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_subject_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// 비밀번호 해시를 가진 로컬 계정을 생성합니다. (아직 저장되지 않음)
    pub(crate) fn new_local(
        display_name: String,
        login_identifier: String,
        credential_hash: String,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            display_name,
            login_identifier,
            credential_hash: Some(credential_hash),
            avatar_url,
            auth_provenance: AuthProvenance::Local,
            external_subject_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 외부 제공자로 인증된 계정을 생성합니다. 비밀번호 해시는 없습니다.
    pub(crate) fn new_federated(
        display_name: String,
        login_identifier: String,
        external_subject_id: String,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            display_name,
            login_identifier,
            credential_hash: None,
            avatar_url,
            auth_provenance: AuthProvenance::Federated,
            external_subject_id: Some(external_subject_id),
            created_at: now,
            updated_at: now,
        }
    }

    /// 저장소가 식별자를 부여한 사본을 반환합니다.
    ///
    /// `AccountStore` 구현이 최초 저장 시에만 호출합니다.
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    /// 표시 이름, 로그인 식별자, 아바타를 교체한 사본
    pub(crate) fn with_profile(
        mut self,
        display_name: String,
        login_identifier: String,
        avatar_url: Option<String>,
    ) -> Self {
        self.display_name = display_name;
        self.login_identifier = login_identifier;
        self.avatar_url = avatar_url;
        self.touch()
    }

    /// 새 비밀번호 해시를 가진 사본. 로컬 계정에만 사용합니다.
    pub(crate) fn with_credential_hash(mut self, credential_hash: String) -> Self {
        self.credential_hash = Some(credential_hash);
        self.touch()
    }

    /// 외부 제공자 로그인 결과로 갱신한 사본
    ///
    /// 비어 있지 않은 이름과 아바타만 반영하고, 출처를 `FEDERATED`로 고정하며
    /// 비밀번호 해시를 제거합니다.
    pub(crate) fn federated_refresh(
        mut self,
        external_subject_id: String,
        display_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        if let Some(name) = display_name.filter(|name| !name.trim().is_empty()) {
            self.display_name = name;
        }
        if let Some(avatar) = avatar_url.filter(|avatar| !avatar.trim().is_empty()) {
            self.avatar_url = Some(avatar);
        }
        self.auth_provenance = AuthProvenance::Federated;
        self.external_subject_id = Some(external_subject_id);
        self.credential_hash = None;
        self.touch()
    }

    /// 비밀번호 해시를 뺀 조회 전용 사본. 저장하지 않으며 `updated_at`도 그대로 둡니다.
    pub(crate) fn without_credential_hash(mut self) -> Self {
        self.credential_hash = None;
        self
    }

    fn touch(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }

    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn login_identifier(&self) -> &str {
        &self.login_identifier
    }

    pub fn credential_hash(&self) -> Option<&str> {
        self.credential_hash.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn auth_provenance(&self) -> AuthProvenance {
        self.auth_provenance
    }

    pub fn external_subject_id(&self) -> Option<&str> {
        self.external_subject_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_local(&self) -> bool {
        self.auth_provenance.is_local()
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_local() && self.credential_hash.as_deref().is_some_and(|hash| !hash.is_empty())
    }

    /// 출처별 불변 조건을 만족하는지 확인합니다.
    pub fn satisfies_provenance_invariants(&self) -> bool {
        match self.auth_provenance {
            AuthProvenance::Local => {
                self.credential_hash.as_deref().is_some_and(|hash| !hash.is_empty())
            }
            AuthProvenance::Federated => {
                self.credential_hash.is_none()
                    && self
                        .external_subject_id
                        .as_deref()
                        .is_some_and(|subject| !subject.is_empty())
            }
        }
    }
}
