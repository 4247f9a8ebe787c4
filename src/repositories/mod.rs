//! 데이터 액세스 계층
//!
//! 신원 서비스는 [`AccountStore`] trait에만 의존하고, 실제 저장소는 시작 시점에
//! 선택해 주입합니다.
//!
//! - [`AccountRepository`] - MongoDB 영구 저장 + Redis 조회 캐시
//! - [`InMemoryAccountStore`] - 프로세스 메모리 저장소 (테스트, 로컬 실행)
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::{AccountStore, InMemoryAccountStore};
//!
//! let store: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::new());
//! let account = store.find_by_login_identifier("root@email.com").await?;
//! ```

pub mod accounts;

pub use accounts::*;
