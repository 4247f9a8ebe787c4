//! 키 단위 비동기 잠금
//!
//! 같은 로그인 식별자에 대한 "조회 후 저장" 작업이 동시에 실행되면 중복 계정이
//! 만들어질 수 있습니다. [`KeyedLock`]은 키마다 하나의 비동기 뮤텍스를 빌려주어
//! 같은 키의 작업만 순서대로 실행하고, 다른 키의 작업은 서로 막지 않습니다.
//!
//! ```rust,ignore
//! let locks = KeyedLock::new();
//! let _guard = locks.acquire("root@email.com").await;
//! // 이 구간에서는 같은 이메일에 대한 다른 작업이 대기합니다
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures_util::lock::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockTable = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// 문자열 키별 비동기 뮤텍스 테이블
#[derive(Clone, Default)]
pub struct KeyedLock {
    locks: LockTable,
}

/// 잠금 해제 시 더 이상 대기자가 없으면 테이블 항목도 정리합니다.
pub struct KeyedLockGuard {
    key: String,
    mutex: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
    locks: LockTable,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 키의 잠금을 획득할 때까지 대기합니다.
    pub async fn acquire(&self, key: &str) -> KeyedLockGuard {
        let mutex = {
            let mut table = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            table
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = mutex.clone().lock_owned().await;

        KeyedLockGuard {
            key: key.to_string(),
            mutex,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// 현재 테이블에 남아 있는 키 개수
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .map(|table| table.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for KeyedLockGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        if let Ok(mut table) = self.locks.lock() {
            // 테이블과 이 가드만 참조 중이면 대기자가 없음
            if Arc::strong_count(&self.mutex) == 2 {
                table.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[actix_web::test]
    async fn test_same_key_is_serialized() {
        let locks = KeyedLock::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let task = |locks: KeyedLock, inside: Arc<AtomicUsize>, max_inside: Arc<AtomicUsize>| async move {
            let _guard = locks.acquire("root@email.com").await;
            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
            max_inside.fetch_max(now, Ordering::SeqCst);
            actix_web::rt::time::sleep(Duration::from_millis(20)).await;
            inside.fetch_sub(1, Ordering::SeqCst);
        };

        futures_util::future::join(
            task(locks.clone(), inside.clone(), max_inside.clone()),
            task(locks.clone(), inside.clone(), max_inside.clone()),
        )
        .await;

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLock::new();
        let _first = locks.acquire("a@email.com").await;
        let _second = locks.acquire("b@email.com").await;

        assert_eq!(locks.len(), 2);
    }

    #[actix_web::test]
    async fn test_table_entry_removed_after_release() {
        let locks = KeyedLock::new();
        {
            let _guard = locks.acquire("root@email.com").await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }
}
