//! bcrypt 기반 비밀번호 해셔
//!
//! 해시에는 매번 새 salt가 포함되므로 같은 비밀번호도 다른 해시가 됩니다.
//! cost는 환경별 [`PasswordConfig`] 값을 따릅니다.

use crate::config::PasswordConfig;
use crate::core::errors::{AppResult, ErrorContext};

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `BCRYPT_COST` 또는 실행 환경 기본값으로 생성합니다.
    pub fn from_config() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    /// 평문 비밀번호를 단방향 해시로 변환합니다.
    ///
    /// # Errors
    ///
    /// bcrypt 내부 오류(잘못된 cost 등) 시 `InternalError`
    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        let start = std::time::Instant::now();

        let hashed = bcrypt::hash(plaintext, self.cost).context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", start.elapsed());
        Ok(hashed)
    }

    /// 평문이 해시와 일치하는지 확인합니다.
    ///
    /// 저장된 해시 형식이 손상된 경우에도 `false`를 반환하여, 호출자가
    /// 일반적인 인증 실패와 구분하지 않도록 합니다.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        match bcrypt::verify(plaintext, hashed) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("저장된 비밀번호 해시 검증 불가: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("p@ssword1").unwrap();

        assert_ne!(hashed, "p@ssword1");
        assert!(hasher.verify("p@ssword1", &hashed));
        assert!(!hasher.verify("wrong", &hashed));
    }

    #[test]
    fn test_same_password_produces_different_hashes() {
        let hasher = PasswordHasher::new(4);

        let first = hasher.hash("rootroot").unwrap();
        let second = hasher.hash("rootroot").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("rootroot", "not-a-bcrypt-hash"));
    }
}
