//! 비즈니스 로직 계층
//!
//! - [`auth`] - 해싱, 토큰, 외부 신원 검증, 자격 증명 확인
//! - [`identity`] - 계정 생성/수정과 로컬/외부 로그인을 조율하는 신원 서비스

pub mod auth;
pub mod identity;
