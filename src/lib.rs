//! 블로그 신원 서비스
//!
//! 개인 블로그의 계정과 로그인을 담당하는 서비스입니다.
//! 이메일/비밀번호 로컬 계정과 Google ID 토큰 기반 외부 계정을 하나의
//! 계정 모델로 관리하고, 로그인에 성공하면 HS256 베어러 토큰을 발급합니다.
//!
//! # Features
//!
//! - **계정 관리**: 로컬 계정 생성, 프로필/비밀번호 수정, 조회
//! - **로컬 로그인**: bcrypt 해시 비교, 계정 존재 여부를 드러내지 않는 실패 응답
//! - **Google 로그인**: JWKS 기반 RS256 ID 토큰 검증, 최초 로그인 시 계정 생성
//! - **MongoDB + Redis**: 계정 영구 저장과 조회 캐시 (메모리 저장소로 대체 가능)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 베어러 토큰 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ IdentityService │ ← 계정 생성/수정, 로컬/외부 로그인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  AccountStore   │ ← MongoDB + Redis 또는 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use blog_identity_service::services::identity::IdentityService;
//!
//! let service = IdentityService::new(store, PasswordHasher::from_config(), tokens, verifier)?;
//!
//! let login = service.authenticate_federated(&id_token).await?;
//! println!("{}", login.bearer_token());
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
