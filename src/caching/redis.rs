//! Redis 캐시 클라이언트
//!
//! `ConnectionManager`가 하나의 멀티플렉스 연결을 유지하고 끊어지면 다시 연결합니다.
//! 값은 JSON 문자열로 저장되며, (역)직렬화 실패는 `redis::ErrorKind::TypeError`로
//! 보고됩니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
}

fn encode<T: Serialize>(value: &T) -> Result<String, RedisError> {
    serde_json::to_string(value)
        .map_err(|e| RedisError::from((redis::ErrorKind::TypeError, "cache value serialization failed", e.to_string())))
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, RedisError> {
    serde_json::from_str(json)
        .map_err(|e| RedisError::from((redis::ErrorKind::TypeError, "cache value deserialization failed", e.to_string())))
}

impl RedisClient {
    /// 연결 관리자를 만들고 PING으로 서버 가용성을 확인합니다.
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let mut connection = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut connection).await?;
        log::debug!("Redis PING 응답 확인");

        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await?;

        value.as_deref().map(decode::<T>).transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), RedisError> {
        let json = encode(value)?;
        let mut connection = self.connection.clone();
        connection.set_ex(key, json, seconds).await
    }

    /// 여러 키를 한 번에 삭제합니다. 빈 목록이면 아무 것도 하지 않습니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut connection = self.connection.clone();
        connection.del(keys).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Account, AccountId};

    #[test]
    fn test_account_survives_cache_encoding() {
        let account = Account::new_local(
            "Root".to_string(),
            "root@email.com".to_string(),
            "$2b$04$hash".to_string(),
            None,
        )
        .with_id(AccountId::new(3));

        let decoded: Account = decode(&encode(&account).unwrap()).unwrap();

        assert_eq!(decoded, account);
    }

    #[test]
    fn test_corrupted_cache_value_is_type_error() {
        let result = decode::<Account>("{not json");

        assert_eq!(result.unwrap_err().kind(), redis::ErrorKind::TypeError);
    }
}
