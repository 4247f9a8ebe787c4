//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::core::AppError;
use crate::domain::models::AuthenticatedAccount;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match authenticate_request(&req) {
                Ok(account) => {
                    log::debug!("인증 성공: {}", account.login_identifier);
                    req.extensions_mut().insert(account);
                }
                Err(err) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "authentication_required",
                            "message": "유효한 인증 토큰이 필요합니다"
                        }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청의 베어러 토큰을 검증하고 인증 주체를 만듭니다.
fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedAccount, AppError> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;

    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(AuthenticatedAccount {
        login_identifier: claims.sub,
        auth_provenance: claims.provenance,
    })
}
