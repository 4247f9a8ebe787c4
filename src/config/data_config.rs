//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 비밀번호 해싱, 서버 바인딩, 계정 저장소 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위의 값으로 설정되어 있으면 그 값을 사용하고,
    /// 아니면 [`PasswordConfig::bcrypt_cost_for_env`]의 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            match cost_str.parse::<u32>() {
                Ok(cost) if (4..=15).contains(&cost) => return cost,
                _ => log::warn!("BCRYPT_COST 값이 올바르지 않습니다 ({}), 환경별 기본값 사용", cost_str),
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 환경별 bcrypt cost 기본값
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }

    /// 로컬 계정 비밀번호의 최소 길이
    pub fn min_password_length() -> usize {
        8
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// 초당 허용 요청 수 (기본값: 100)
    pub fn rate_limit_per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(100)
    }

    /// 버스트 허용량 (기본값: 200)
    pub fn rate_limit_burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(200)
    }
}

/// 계정 저장소 구현 선택
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// MongoDB + Redis 캐시
    Mongo,
    /// 프로세스 메모리 (로컬 실행 및 데모용, 재시작 시 소멸)
    Memory,
}

/// 계정 저장소 설정
///
/// ```bash
/// export ACCOUNT_STORE="mongo"       # mongo | memory
/// export MONGODB_URI="mongodb://localhost:27017"
/// export DATABASE_NAME="blog_identity"
/// export REDIS_URL="redis://localhost:6379"
/// ```
pub struct StorageConfig;

impl StorageConfig {
    pub fn backend() -> StorageBackend {
        match env::var("ACCOUNT_STORE")
            .unwrap_or_else(|_| "mongo".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" | "in-memory" | "inmemory" => StorageBackend::Memory,
            _ => StorageBackend::Mongo,
        }
    }

    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "blog_identity".to_string())
    }

    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 계정 캐시 TTL (초)
    pub fn cache_ttl_seconds() -> u64 {
        env::var("ACCOUNT_CACHE_TTL_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }

        if env::var("RATE_LIMIT_PER_SECOND").is_err() {
            assert_eq!(ServerConfig::rate_limit_per_second(), 100);
        }
    }

    #[test]
    fn test_storage_config_defaults() {
        if env::var("ACCOUNT_STORE").is_err() {
            assert_eq!(StorageConfig::backend(), StorageBackend::Mongo);
        }

        if env::var("ACCOUNT_CACHE_TTL_SECS").is_err() {
            assert_eq!(StorageConfig::cache_ttl_seconds(), 600);
        }
    }
}
