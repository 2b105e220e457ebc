//! Facebook OAuth 2.0 설정
//!
//! 전역 정적 접근자 대신 명시적인 설정 구조체를 사용합니다.
//! 프로세스 시작 시 `from_env()`로 한 번 구성되고, 이후에는 불변으로
//! `web::Data`를 통해 핸들러와 서비스에 주입됩니다.
//! 테스트에서는 환경변수 없이 구조체를 직접 구성하여 대체 자격증명을 사용할 수 있습니다.

use std::env;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Facebook OAuth 2.0 클라이언트 설정
///
/// Authorization Code Grant 플로우에 필요한 모든 값을 담습니다.
/// 자격증명 3개(`client_id`, `client_secret`, `redirect_uri`)는 필수이며,
/// 엔드포인트 URI들은 Facebook Graph API v10.0 기본값을 가집니다.
/// 엔드포인트를 환경변수로 덮어쓸 수 있어 테스트에서 스텁 서버로 교체 가능합니다.
#[derive(Debug, Clone)]
pub struct FacebookOAuthConfig {
    /// Facebook 앱 클라이언트 ID
    pub client_id: String,

    /// Facebook 앱 클라이언트 시크릿
    pub client_secret: String,

    /// 인증 완료 후 Facebook이 되돌아올 콜백 URL
    pub redirect_uri: String,

    /// 로그인 다이얼로그(authorization) 엔드포인트
    pub auth_uri: String,

    /// Authorization code를 access token으로 교환하는 엔드포인트
    pub token_uri: String,

    /// 사용자 프로필 조회 엔드포인트
    pub profile_uri: String,

    /// 요청할 권한 범위
    pub scope: String,

    /// OAuth state 서명에 사용하는 시크릿
    pub state_secret: String,

    /// state 유효 시간 (분)
    pub state_timeout_minutes: u64,

    /// 외부(Facebook) 요청당 타임아웃
    pub provider_timeout: Duration,
}

impl FacebookOAuthConfig {
    /// 환경변수에서 설정을 로드합니다.
    ///
    /// # Environment Variables
    ///
    /// * `FACEBOOK_CLIENT_ID` - 필수
    /// * `FACEBOOK_CLIENT_SECRET` - 필수
    /// * `FACEBOOK_REDIRECT_URI` - 필수
    /// * `FACEBOOK_AUTH_URI` - 기본값: Facebook v10.0 dialog 엔드포인트
    /// * `FACEBOOK_TOKEN_URI` - 기본값: Graph API v10.0 access_token 엔드포인트
    /// * `FACEBOOK_PROFILE_URI` - 기본값: `https://graph.facebook.com/me`
    /// * `FACEBOOK_SCOPE` - 기본값: `email`
    /// * `OAUTH_STATE_SECRET` - 미설정 시 경고 후 기본값 사용
    /// * `OAUTH_STATE_TIMEOUT_MINUTES` - 기본값: 10
    /// * `PROVIDER_TIMEOUT_SECONDS` - 기본값: 10
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 필수 환경변수 누락
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            client_id: required_var("FACEBOOK_CLIENT_ID")?,
            client_secret: required_var("FACEBOOK_CLIENT_SECRET")?,
            redirect_uri: required_var("FACEBOOK_REDIRECT_URI")?,
            auth_uri: env::var("FACEBOOK_AUTH_URI")
                .unwrap_or_else(|_| "https://www.facebook.com/v10.0/dialog/oauth".to_string()),
            token_uri: env::var("FACEBOOK_TOKEN_URI").unwrap_or_else(|_| {
                "https://graph.facebook.com/v10.0/oauth/access_token".to_string()
            }),
            profile_uri: env::var("FACEBOOK_PROFILE_URI")
                .unwrap_or_else(|_| "https://graph.facebook.com/me".to_string()),
            scope: env::var("FACEBOOK_SCOPE").unwrap_or_else(|_| "email".to_string()),
            state_secret: env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
                log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
                "oauth-state-secret".to_string()
            }),
            state_timeout_minutes: parsed_var("OAUTH_STATE_TIMEOUT_MINUTES", 10),
            provider_timeout: Duration::from_secs(parsed_var("PROVIDER_TIMEOUT_SECONDS", 10)),
        })
    }
}

fn required_var(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::ConfigError(format!("{} must be set", name)))
}

fn parsed_var(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
