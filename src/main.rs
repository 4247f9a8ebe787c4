//! 블로그 신원 서비스 메인 애플리케이션
//!
//! 계정 저장소와 인증 구성 요소를 조립하고 Actix-web HTTP 서버를 구동합니다.
//! `ACCOUNT_STORE=memory`이면 MongoDB/Redis 없이 메모리 저장소로 실행됩니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use blog_identity_service::caching::redis::RedisClient;
use blog_identity_service::config::{GoogleOAuthConfig, JwtConfig, ServerConfig, StorageBackend, StorageConfig};
use blog_identity_service::core::errors::AppError;
use blog_identity_service::db::Database;
use blog_identity_service::repositories::{AccountRepository, AccountStore, InMemoryAccountStore};
use blog_identity_service::routes::configure_all_routes;
use blog_identity_service::services::auth::{GoogleIdTokenVerifier, PasswordHasher, TokenService};
use blog_identity_service::services::identity::IdentityService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 블로그 신원 서비스 시작중...");

    let store = initialize_account_store().await.map_err(to_io_error)?;

    let token_service = Arc::new(TokenService::new(JwtConfig::token_settings()));
    let verifier = GoogleOAuthConfig::verifier_settings()
        .and_then(GoogleIdTokenVerifier::new)
        .map_err(to_io_error)?;
    info!("🔑 Google ID 토큰 audience: {}", verifier.audience());

    let identity_service = IdentityService::new(
        store,
        PasswordHasher::from_config(),
        token_service.clone(),
        Arc::new(verifier),
    )
    .map_err(to_io_error)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(web::Data::new(identity_service), web::Data::from(token_service)).await
}

fn to_io_error(e: AppError) -> std::io::Error {
    error!("서비스 초기화 실패: {}", e);
    std::io::Error::other(e.to_string())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 접근 로그, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    identity_service: web::Data<IdentityService>,
    token_service: web::Data<TokenService>,
) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let per_second = ServerConfig::rate_limit_per_second();
    let burst_size = ServerConfig::rate_limit_burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            .app_data(identity_service.clone())
            .app_data(token_service.clone())

            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// `PROFILE`(기본값 `dev`)에 해당하는 `.env.<profile>` 파일을 로드합니다
///
/// 알 수 없는 프로필이면 기본 `.env` 파일을 찾습니다. 파일이 없어도 이미 설정된
/// 환경 변수로 계속 실행됩니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "dev" | "prod" => dotenv::from_filename(format!(".env.{}", profile)),
        _ => dotenv(),
    };

    match loaded {
        Ok(path) => info!("프로필 {} - 환경 파일 로드 됨: {}", profile, path.display()),
        Err(e) => error!("프로필 {} - 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 환경변수 `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// `ACCOUNT_STORE` 설정에 따라 계정 저장소를 준비합니다
///
/// MongoDB 저장소는 Redis 캐시를 함께 사용하며, 시작 시 인덱스를 생성합니다.
///
/// # Errors
///
/// * `DatabaseError` - MongoDB 연결 또는 인덱스 생성 실패
/// * `RedisError` - Redis 연결 실패
async fn initialize_account_store() -> Result<Arc<dyn AccountStore>, AppError> {
    match StorageConfig::backend() {
        StorageBackend::Memory => {
            info!("💾 메모리 계정 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Ok(Arc::new(InMemoryAccountStore::new()))
        }
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Arc::new(
                Database::new(&StorageConfig::mongodb_uri(), &StorageConfig::database_name())
                    .await
                    .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?,
            );
            info!("✅ MongoDB 연결 성공");

            let redis_client = Arc::new(
                RedisClient::new(&StorageConfig::redis_url())
                    .await
                    .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?,
            );
            info!("✅ Redis 연결 성공");

            let repository = AccountRepository::new(database, redis_client, StorageConfig::cache_ttl_seconds());
            repository.create_indexes().await?;

            Ok(Arc::new(repository))
        }
    }
}

/// 블로그 프론트엔드와의 통신을 위한 CORS 설정
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
