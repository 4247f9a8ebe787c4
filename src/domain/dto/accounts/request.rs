//! 계정 관련 요청 본문
//!
//! 기존 클라이언트가 보내는 `email`/`name` 필드명도 별칭으로 받습니다.

use std::fmt;

use serde::Deserialize;
use validator::Validate;

use crate::config::AuthProvenance;
use crate::domain::entities::AccountId;
use crate::utils::string_utils::deserialize_optional_string;

/// 계정 생성 요청
///
/// 출처가 생략되면 `LOCAL`로 간주합니다. 비밀번호 규칙(로컬 계정은 8자 이상)은
/// 출처에 따라 달라지므로 `IdentityService::create_account`에서 검사합니다.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct NewAccount {
    #[serde(alias = "email")]
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 255, message = "이메일은 255자 이하여야 합니다")
    )]
    pub login_identifier: String,

    #[serde(alias = "name")]
    #[validate(length(min = 1, max = 255, message = "이름은 1-255자 사이여야 합니다"))]
    pub display_name: String,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default, alias = "photo", deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "아바타 URL은 5000자 이하여야 합니다"))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub auth_provenance: Option<AuthProvenance>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub external_subject_id: Option<String>,
}

/// 계정 수정 요청
///
/// 출처는 요청 값이 아닌 저장된 계정 기준으로 결정되므로 받지 않습니다.
#[derive(Clone, Deserialize, Validate)]
pub struct AccountUpdate {
    pub id: AccountId,

    #[serde(alias = "email")]
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 255, message = "이메일은 255자 이하여야 합니다")
    )]
    pub login_identifier: String,

    #[serde(alias = "name")]
    #[validate(length(min = 1, max = 255, message = "이름은 1-255자 사이여야 합니다"))]
    pub display_name: String,

    #[serde(default, alias = "photo", deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "아바타 URL은 5000자 이하여야 합니다"))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// 로컬 로그인 요청
///
/// 필드가 빠진 본문도 역직렬화한 뒤 검증 단계에서 `ValidationError`로 거절합니다.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct LoginCredentials {
    #[serde(default, alias = "email")]
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub login_identifier: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("login_identifier", &self.login_identifier)
            .field("password", &"***")
            .finish()
    }
}

/// Google 로그인 요청 (클라이언트가 받은 ID 토큰)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[serde(default, alias = "token")]
    #[validate(length(min = 1, message = "ID 토큰이 필요합니다"))]
    pub id_token: String,
}
