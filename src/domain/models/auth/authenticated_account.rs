//! 인증된 요청 주체
//!
//! [`crate::middlewares::AuthMiddleware`]가 베어러 토큰을 검증한 뒤 요청
//! extensions에 넣어 두고, 핸들러는 추출자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("")]
//! pub async fn list_accounts(caller: AuthenticatedAccount, ...) -> Result<HttpResponse, AppError> {
//!     log::debug!("계정 목록 조회 - 요청자: {}", caller.login_identifier);
//!     ...
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvenance;
use crate::core::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedAccount {
    /// 토큰의 subject (로그인 식별자)
    pub login_identifier: String,

    pub auth_provenance: AuthProvenance,
}

impl FromRequest for AuthenticatedAccount {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedAccount>() {
            Some(account) => ready(Ok(account.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}
