//! Database Connection Management Module
//!
//! MongoDB 연결을 관리합니다. 드라이버가 내부적으로 연결 풀을 유지하므로
//! `Database`는 `Arc`로 공유해 사용합니다.
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::new(&StorageConfig::mongodb_uri(), &StorageConfig::database_name()).await?;
//! let accounts = database.collection::<Account>("accounts");
//! ```

use mongodb::{Client, Collection, options::ClientOptions};
use log::info;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 클라이언트를 생성하고 `ping` 명령으로 연결을 확인합니다.
    pub async fn new(mongodb_uri: &str, database_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(mongodb_uri).await?;

        // 모니터링 및 로깅용 애플리케이션 이름
        client_options.app_name = Some("blog_identity".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
