//! 외부 신원 검증기 계약
//!
//! 외부 제공자가 발급한 신원 증명(ID 토큰)을 검증하고 신원 정보를 추출합니다.
//! 신뢰하는 audience는 구현체 생성 시점에 고정됩니다.
//!
//! 결과는 세 가지로 구분됩니다.
//!
//! - `Ok(Some(identity))`: 검증 성공
//! - `Ok(None)`: 형식상 문제는 없지만 검증할 수 없음 (일치하는 서명 키 없음,
//!   이메일 누락, 이메일 미인증)
//! - `Err(VerifierError)`: 형식 오류, 서명/클레임 불일치, 만료, 키 조회 실패
//!
//! 에러의 상세 내용은 로그로만 남기며, 호출자에게는 일반화된 인증 실패로 전달됩니다.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::identity::VerifiedIdentity;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("malformed identity token: {0}")]
    Malformed(String),

    #[error("identity token rejected: {0}")]
    Rejected(String),

    #[error("identity token expired")]
    Expired,

    #[error("signing keys unavailable: {0}")]
    KeySetUnavailable(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, assertion: &str) -> Result<Option<VerifiedIdentity>, VerifierError>;
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;

    use super::*;

    /// 미리 등록한 토큰 문자열만 인정하는 검증기
    #[derive(Default)]
    pub struct StaticIdentityVerifier {
        identities: HashMap<String, Option<VerifiedIdentity>>,
    }

    impl StaticIdentityVerifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_identity(mut self, token: &str, identity: VerifiedIdentity) -> Self {
            self.identities.insert(token.to_string(), Some(identity));
            self
        }

        /// 검증은 통과하지만 신원을 확정할 수 없는 토큰
        pub fn with_unverifiable(mut self, token: &str) -> Self {
            self.identities.insert(token.to_string(), None);
            self
        }
    }

    #[async_trait]
    impl IdentityVerifier for StaticIdentityVerifier {
        async fn verify(&self, assertion: &str) -> Result<Option<VerifiedIdentity>, VerifierError> {
            self.identities
                .get(assertion)
                .cloned()
                .ok_or_else(|| VerifierError::Rejected("unknown token".to_string()))
        }
    }

    pub fn google_identity(email: &str, name: &str, picture: &str, subject: &str) -> VerifiedIdentity {
        VerifiedIdentity {
            email: email.to_string(),
            display_name: Some(name.to_string()),
            avatar_url: Some(picture.to_string()),
            external_subject_id: subject.to_string(),
        }
    }
}
