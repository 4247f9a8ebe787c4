//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! 각 설정 구조체는 상태가 없는 단위 구조체이며, 호출 시점의 환경 변수를 읽습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 비밀번호 해싱, 서버, 계정 저장소 설정
//! - [`auth_config`] - JWT, Google ID 토큰 검증, 인증 출처 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//!
//! # Google 로그인
//! export GOOGLE_CLIENT_ID="your-client-id"
//!
//! # 저장소
//! export ACCOUNT_STORE="mongo"      # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 환경 / 보안
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
