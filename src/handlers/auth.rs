//! 인증 핸들러
//!
//! 로컬 로그인과 Google ID 토큰 로그인을 처리합니다. 두 경로 모두
//! [`LoginResult`](crate::domain::models::LoginResult)를 반환합니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::accounts::{GoogleLoginRequest, LoginCredentials};
use crate::services::identity::IdentityService;

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login`
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"root@email.com","password":"rootroot"}'
/// ```
#[post("/login")]
pub async fn local_login(
    service: web::Data<IdentityService>,
    payload: web::Json<LoginCredentials>,
) -> Result<HttpResponse, AppError> {
    log::info!("로컬 로그인 시도 - 사용자: {}", payload.login_identifier);

    let result = service.authenticate_local(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Google 로그인 핸들러
///
/// 클라이언트가 Google에서 받은 ID 토큰을 검증하고, 처음 보는 이메일이면
/// 계정을 만듭니다.
///
/// # Endpoint
/// `POST /api/v1/auth/google`
#[post("/google")]
pub async fn google_login(
    service: web::Data<IdentityService>,
    payload: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = service.authenticate_federated(&payload.id_token).await?;

    Ok(HttpResponse::Ok().json(result))
}
