//! 베어러 토큰 인증 미들웨어
//!
//! 보호된 스코프에 `wrap`하면, 유효한 베어러 토큰이 없는 요청은 핸들러에 닿기 전에
//! 401로 거절됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 베어러 토큰 인증 미들웨어
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
