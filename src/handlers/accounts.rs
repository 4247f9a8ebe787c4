//! # Account HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/accounts/register` | 계정 생성 (회원가입) | 201 Created |
//! | `PUT` | `/api/v1/accounts` | 계정 수정 (인증 필요) | 200 OK |
//! | `GET` | `/api/v1/accounts` | 계정 목록 (인증 필요) | 200 OK |
//! | `GET` | `/api/v1/accounts/{id}` | 계정 조회 (인증 필요) | 200 OK |
//!
//! 응답 본문은 [`AccountResponse`]이며 비밀번호 해시는 포함되지 않습니다.

use actix_web::{web, HttpResponse, get, post, put};

use crate::core::errors::AppError;
use crate::domain::dto::accounts::{AccountResponse, AccountUpdate, NewAccount};
use crate::domain::entities::AccountId;
use crate::domain::models::AuthenticatedAccount;
use crate::services::identity::IdentityService;

/// 계정 생성 핸들러
///
/// 출처를 생략하면 로컬 계정으로 생성됩니다.
///
/// # Endpoint
/// `POST /api/v1/accounts/register`
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/accounts/register \
///   -H "Content-Type: application/json" \
///   -d '{"login_identifier":"root@email.com","display_name":"Root","password":"rootroot"}'
/// ```
#[post("/api/v1/accounts/register")]
pub async fn register_account(
    service: web::Data<IdentityService>,
    payload: web::Json<NewAccount>,
) -> Result<HttpResponse, AppError> {
    let account = service.create_account(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// 계정 수정 핸들러
///
/// 역할이나 소유권 모델이 없으므로 인증된 호출자는 누구든 임의의 계정을 수정할 수
/// 있습니다. 대상은 본문의 `id`로 정해지며 호출자 신원은 로그에만 남깁니다.
///
/// # Endpoint
/// `PUT /api/v1/accounts`
#[put("")]
pub async fn update_account(
    service: web::Data<IdentityService>,
    caller: AuthenticatedAccount,
    payload: web::Json<AccountUpdate>,
) -> Result<HttpResponse, AppError> {
    log::debug!("계정 수정 요청 - 요청자: {}, 대상 ID: {}", caller.login_identifier, payload.id);

    let account = service.update_account(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

#[get("")]
pub async fn list_accounts(
    service: web::Data<IdentityService>,
    caller: AuthenticatedAccount,
) -> Result<HttpResponse, AppError> {
    log::debug!("계정 목록 조회 - 요청자: {}", caller.login_identifier);

    let accounts: Vec<AccountResponse> = service
        .list_accounts()
        .await?
        .iter()
        .map(AccountResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(accounts))
}

/// 계정 단건 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/accounts/{id}`
#[get("/{id}")]
pub async fn get_account(
    service: web::Data<IdentityService>,
    _caller: AuthenticatedAccount,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let account = service.find_account(AccountId::new(id.into_inner())).await?;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}
