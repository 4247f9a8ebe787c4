//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 계정 조회 캐시를 제공합니다. 값은 JSON으로 직렬화되며
//! 모든 항목은 TTL을 가집니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new(&StorageConfig::redis_url()).await?;
//! cache.set_with_expiry("account:id:1", &account, 600).await?;
//! let cached: Option<Account> = cache.get("account:id:1").await?;
//! ```

pub mod redis;
