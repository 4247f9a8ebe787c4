//! # Application Error Handling
//!
//! 신원/인증 서비스 전역에서 사용하는 단일 에러 타입입니다.
//! 서비스 계층은 항상 `AppResult<T>`를 반환하고, 핸들러는 `?`로 전파만 하면
//! `ResponseError` 구현이 적절한 HTTP 응답으로 변환합니다.
//!
//! ## 에러 분류
//!
//! 도메인 에러는 클라이언트에게 그대로 전달되고, 재시도하지 않는 종단 에러입니다.
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 짧은 비밀번호 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, ID 토큰 검증 실패, 베어러 토큰 오류 |
//! | `NotFound` | 404 Not Found | 존재하지 않는 계정 |
//! | `ConflictError` | 409 Conflict | 로그인 식별자(이메일) 중복 |
//!
//! 인프라 에러(`DatabaseError`, `RedisError`, `InternalError`)는
//! 모두 500으로 응답하며, 상세 내용은 서버 로그에만 남기고 응답 본문에는 노출하지 않습니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_account(&self, id: AccountId) -> AppResult<Account> {
//!     self.store.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", id)))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 통해
/// HTTP 응답으로 자동 변환됩니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // MongoDB 에러 변환
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // Redis 에러 변환
/// redis_client.get::<Account>("account:id:1").await
///     .map_err(|e| AppError::RedisError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// MongoDB 연산(조회, 삽입, 시퀀스 발급, 인덱스 생성) 실패를 나타냅니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러
    ///
    /// 계정 캐시는 조회 보조 수단이므로, 저장소 구현은 대부분의 캐시 실패를
    /// 로그만 남기고 무시합니다.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러
    ///
    /// # 발생 시나리오
    /// - 이메일 형식 오류, 이름/아바타 길이 제한 위반
    /// - 로컬 계정 생성 시 비어 있거나 8자 미만인 비밀번호
    /// - 외부 계정 생성 시 외부 subject ID 누락
    /// - 요청 본문 누락 또는 JSON 파싱 실패
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러
    ///
    /// ```rust,ignore
    /// let account = store.find_by_id(id).await?
    ///     .ok_or_else(|| AppError::NotFound(format!("계정을 찾을 수 없습니다: {}", id)))?;
    /// ```
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러
    ///
    /// 다른 계정이 이미 사용 중인 로그인 식별자로 생성하거나 수정하려 할 때 발생합니다.
    /// 동시 생성 경쟁에서 진 요청도 이 에러를 받습니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러
    ///
    /// # 발생 시나리오
    /// - 잘못된 로그인 정보 (존재하지 않는 이메일과 틀린 비밀번호를 구분하지 않음)
    /// - 외부 제공자로 가입한 계정의 비밀번호 로그인 시도
    /// - 유효하지 않거나 만료된 Google ID 토큰
    /// - 누락되었거나 만료된 베어러 토큰
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러
    ///
    /// 해시 계산 실패, 토큰 서명 실패 등 예상하지 못한 시스템 오류입니다.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 이 에러가 클라이언트 요청 때문에 발생한 도메인 에러인지 여부
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::NotFound(_)
                | AppError::ConflictError(_)
                | AppError::AuthenticationError(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러 응답은 다음 JSON 형식을 따릅니다:
    ///
    /// ```json
    /// { "error": "Human readable error message" }
    /// ```
    ///
    /// 5xx 에러는 서버 로그에 상세 내용을 기록하고, 클라이언트에는
    /// 일반화된 메시지만 반환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            log::error!("요청 처리 중 내부 오류 발생: {}", self);
            "Internal server error".to_string()
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": message
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let hash = bcrypt::hash(password, cost).context("비밀번호 해싱 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("비밀번호는 최소 8자 이상이어야 합니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("계정을 찾을 수 없습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("이미 사용 중인 이메일입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_infrastructure_errors_map_to_500() {
        let errors = [
            AppError::DatabaseError("connection reset".to_string()),
            AppError::RedisError("timeout".to_string()),
            AppError::InternalError("Something went wrong".to_string()),
        ];

        for error in errors {
            assert!(!error.is_client_error());
            assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[actix_web::test]
    async fn test_internal_error_body_hides_detail() {
        let error = AppError::DatabaseError("mongodb://admin:secret@db".to_string());
        let body = actix_web::body::to_bytes(error.error_response().into_body())
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(!text.contains("secret"));
        assert!(text.contains("Internal server error"));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
