//! 신원 서비스 모듈
//!
//! 계정 생성/수정과 두 가지 로그인 경로(로컬, 외부 제공자)를 제공합니다.

pub mod identity_service;

pub use identity_service::IdentityService;
