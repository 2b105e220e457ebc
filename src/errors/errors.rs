//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! OAuth2 로그인 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! Facebook이 직접 보고한 실패(토큰 교환/프로필 조회의 non-200 응답)는
//! Facebook의 상태 코드를 그대로 클라이언트에게 전달하고,
//! 네트워크 계층 실패(타임아웃, 연결 불가)는 502/504 계열로 구분합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn callback(query: CallbackQuery) -> Result<UserData, AppError> {
//!     let code = query.code.ok_or(AppError::MissingCodeError)?;
//!
//!     let profile = flow.exchange_code_for_profile(&code).await?;
//!
//!     Ok(profile)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// OAuth2 인증 플로우에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 콜백에 authorization code가 없음 (400 Bad Request)
    #[error("Missing authorization code")]
    MissingCodeError,

    /// OAuth state 누락/위조/만료 (401 Unauthorized)
    #[error("Invalid OAuth state: {0}")]
    InvalidStateError(String),

    /// 사용자가 동의를 거부했거나 Facebook이 에러를 돌려줌 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 토큰 엔드포인트가 non-200 응답 (Facebook 상태 코드 그대로 전달)
    #[error("Error obtaining Facebook tokens.")]
    TokenExchangeError(u16),

    /// 프로필 엔드포인트가 non-200 응답 (Facebook 상태 코드 그대로 전달)
    #[error("Failed to fetch user profile.")]
    ProfileFetchError(u16),

    /// 외부 요청 타임아웃 (504 Gateway Timeout)
    #[error("Identity provider timed out: {0}")]
    ProviderTimeoutError(String),

    /// 외부 요청 전송 실패 (502 Bad Gateway)
    #[error("Identity provider unreachable: {0}")]
    NetworkError(String),

    /// 환경변수 누락 등 설정 에러 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// 각 에러 타입을 적절한 HTTP 상태 코드로 변환합니다.
    ///
    /// `TokenExchangeError`/`ProfileFetchError`는 Facebook이 반환한 상태 코드를
    /// 그대로 사용하며, 코드가 유효 범위를 벗어나면 502로 대체합니다.
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::MissingCodeError => StatusCode::BAD_REQUEST,
            AppError::InvalidStateError(_) | AppError::AuthenticationError(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::TokenExchangeError(status) | AppError::ProfileFetchError(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::ProviderTimeoutError(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::NetworkError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
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
