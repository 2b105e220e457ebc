//! # Facebook OAuth 2.0 인증 서비스
//!
//! Facebook OAuth 2.0 프로토콜을 통한 소셜 로그인 기능을 제공합니다.
//! RFC 6749 OAuth 2.0 Authorization Code Grant 플로우를 구현합니다.
//!
//! ## OAuth 2.0 Authorization Code Flow
//!
//! ```text
//! ┌────────────┐                         ┌─────────────────┐                     ┌──────────────────┐
//! │  브라우저    │                         │   우리 서버      │                     │  Facebook OAuth  │
//! └────────────┘                         └─────────────────┘                     └──────────────────┘
//!       │                                         │                                      │
//!       │ 1. GET /login/facebook                  │                                      │
//!       ├────────────────────────────────────────►│                                      │
//!       │                                         │ 2. state 생성 & 인증 URL 구성          │
//!       │ 3. 302 Redirect to Facebook             │                                      │
//!       │◄────────────────────────────────────────┤                                      │
//!       │                                         │                                      │
//!       │ 4. 사용자 로그인 및 동의                    │                                      │
//!       ├─────────────────────────────────────────┼─────────────────────────────────────►│
//!       │ 5. Redirect with code & state           │                                      │
//!       │◄────────────────────────────────────────┼──────────────────────────────────────┤
//!       │                                         │                                      │
//!       │ 6. GET /login/facebook/callback         │                                      │
//!       ├────────────────────────────────────────►│                                      │
//!       │                                         │ 7. state 검증                         │
//!       │                                         │ 8. code → access token 교환           │
//!       │                                         ├─────────────────────────────────────►│
//!       │                                         │◄─────────────────────────────────────┤
//!       │                                         │ 9. 프로필 조회 (id,name,email)         │
//!       │                                         ├─────────────────────────────────────►│
//!       │                                         │◄─────────────────────────────────────┤
//!       │ 10. 200 {"user_data": {...}}            │                                      │
//!       │◄────────────────────────────────────────┤                                      │
//! ```
//!
//! 콜백 처리 내부의 상태 전이는 선형입니다(분기 복귀 없음):
//! Received → Exchanging → Token Obtained → Fetching Profile → Complete.
//! 토큰 교환이 완료되기 전에는 프로필 조회를 시작하지 않으며,
//! access token은 프로필 조회 동안만 메모리에 존재하고 저장되지 않습니다.

use async_trait::async_trait;

use crate::config::FacebookOAuthConfig;
use crate::domain::dto::auth_response::FacebookTokenResponse;
use crate::domain::models::facebook_user::FacebookUserProfile;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::services::auth::oauth_state::StateSigner;

/// 로그인 플로우 인터페이스
///
/// 전체 플로우를 {리다이렉트 URL 구성, code→프로필 교환} 두 능력으로 추상화합니다.
/// 핸들러는 이 trait만 의존하므로 테스트에서 스텁 구현으로 교체할 수 있습니다.
/// 구체 구현은 [`FacebookAuthService`] 하나입니다.
#[async_trait]
pub trait LoginFlow: Send + Sync {
    /// Facebook 인증 페이지로의 리다이렉트 URL을 생성합니다.
    fn build_redirect(&self) -> AppResult<String>;

    /// Authorization code를 access token으로 교환한 뒤 사용자 프로필을 조회합니다.
    ///
    /// `state`는 [`LoginFlow::build_redirect`]가 발급한 값이어야 합니다.
    async fn exchange_code_for_profile(
        &self,
        code: &str,
        state: &str,
    ) -> AppResult<FacebookUserProfile>;
}

/// Facebook OAuth 2.0 인증 서비스
///
/// ## 주요 책임
///
/// 1. **OAuth URL 생성**: Facebook 로그인 다이얼로그로의 리다이렉트 URL 생성
/// 2. **State 검증**: 콜백의 CSRF 방지 state 확인
/// 3. **토큰 교환**: Authorization Code를 Access Token으로 교환
/// 4. **프로필 조회**: Graph API를 통한 사용자 정보(id, name, email) 획득
///
/// 외부 요청마다 타임아웃이 설정된 HTTP 클라이언트를 새로 생성하며,
/// 호출이 끝나면 클라이언트는 해제됩니다(연결 풀 유지 없음, 재시도 없음).
/// 설정은 생성 시 주입되므로 테스트에서 스텁 엔드포인트로 교체 가능합니다.
pub struct FacebookAuthService {
    config: FacebookOAuthConfig,
    state_signer: StateSigner,
}

impl FacebookAuthService {
    pub fn new(config: FacebookOAuthConfig) -> Self {
        let state_signer = StateSigner::new(
            config.state_secret.clone(),
            config.state_timeout_minutes,
        );

        Self {
            config,
            state_signer,
        }
    }

    /// 호출 범위로 한정된 HTTP 클라이언트를 생성합니다.
    fn http_client(&self) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.config.provider_timeout)
            .build()
            .context("HTTP 클라이언트 생성 실패")
    }

    /// Authorization Code를 Access Token으로 교환합니다.
    ///
    /// Graph API 토큰 엔드포인트는 쿼리 파라미터 GET 요청을 받습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::TokenExchangeError` - Facebook이 non-200 응답 (상태 코드 전달)
    /// * `AppError::ProviderTimeoutError` / `AppError::NetworkError` - 전송 계층 실패
    /// * `AppError::InternalError` - 200 응답이지만 본문에 access_token 누락 등 파싱 실패
    async fn exchange_code_for_token(&self, auth_code: &str) -> AppResult<FacebookTokenResponse> {
        let client = self.http_client()?;

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", auth_code),
        ];

        let response = client
            .get(&self.config.token_uri)
            .query(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Facebook 토큰 교환 실패: status {}", status);
            return Err(AppError::TokenExchangeError(status.as_u16()));
        }

        response
            .json::<FacebookTokenResponse>()
            .await
            .with_context(|| format!("Facebook 토큰 응답 파싱 실패 (status {})", status))
    }

    /// Access Token으로 사용자 프로필을 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProfileFetchError` - Facebook이 non-200 응답 (상태 코드 전달)
    /// * `AppError::ProviderTimeoutError` / `AppError::NetworkError` - 전송 계층 실패
    async fn fetch_user_profile(&self, access_token: &str) -> AppResult<FacebookUserProfile> {
        let client = self.http_client()?;

        let params = [("access_token", access_token), ("fields", "id,name,email")];

        let response = client
            .get(&self.config.profile_uri)
            .query(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Facebook 프로필 조회 실패: status {}", status);
            return Err(AppError::ProfileFetchError(status.as_u16()));
        }

        response
            .json::<FacebookUserProfile>()
            .await
            .context("Facebook 프로필 응답 파싱 실패")
    }
}

#[async_trait]
impl LoginFlow for FacebookAuthService {
    fn build_redirect(&self) -> AppResult<String> {
        let state = self.state_signer.generate()?;

        let params = [
            ("client_id", self.config.client_id.clone()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("scope", self.config.scope.clone()),
            ("response_type", "code".to_string()),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", self.config.auth_uri, query_string))
    }

    async fn exchange_code_for_profile(
        &self,
        code: &str,
        state: &str,
    ) -> AppResult<FacebookUserProfile> {
        // 1. State 검증 (외부 요청 전에 수행)
        self.state_signer.verify(state)?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(code).await?;

        // 3. 액세스 토큰으로 사용자 프로필 조회 (교환 완료 후에만 시작)
        let profile = self
            .fetch_user_profile(&token_response.access_token)
            .await?;

        log::info!("Facebook 로그인 성공: 사용자 id {}", profile.id);

        Ok(profile)
    }
}

/// reqwest 전송 계층 에러를 분류합니다.
///
/// 타임아웃은 504, 그 외 연결 실패는 502로 구분되어
/// Facebook이 직접 보고한 실패(상태 코드 전달)와 섞이지 않습니다.
fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::ProviderTimeoutError(e.to_string())
    } else {
        AppError::NetworkError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use serde::Deserialize;
    use serde_json::json;

    /// 스텁 Facebook 역할을 하는 in-process 서버의 상태
    struct ProviderState {
        token_status: u16,
        profile_status: u16,
        seen_codes: Mutex<HashSet<String>>,
        token_hits: AtomicUsize,
        profile_hits: AtomicUsize,
    }

    impl ProviderState {
        fn new(token_status: u16, profile_status: u16) -> Self {
            Self {
                token_status,
                profile_status,
                seen_codes: Mutex::new(HashSet::new()),
                token_hits: AtomicUsize::new(0),
                profile_hits: AtomicUsize::new(0),
            }
        }
    }

    #[derive(Deserialize)]
    struct TokenQuery {
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        code: String,
    }

    #[derive(Deserialize)]
    struct ProfileQuery {
        access_token: String,
        fields: String,
    }

    async fn stub_token_endpoint(
        state: web::Data<ProviderState>,
        query: web::Query<TokenQuery>,
    ) -> HttpResponse {
        state.token_hits.fetch_add(1, Ordering::SeqCst);

        assert_eq!(query.client_id, "client-123");
        assert_eq!(query.client_secret, "secret-456");
        assert!(!query.redirect_uri.is_empty());

        if state.token_status != 200 {
            return HttpResponse::build(StatusCode::from_u16(state.token_status).unwrap())
                .json(json!({"error": "provider rejected"}));
        }

        // Authorization code는 1회용: 재사용 시 거부
        let mut seen = state.seen_codes.lock().unwrap();
        if !seen.insert(query.code.clone()) {
            return HttpResponse::BadRequest()
                .json(json!({"error": "authorization code already used"}));
        }

        HttpResponse::Ok().json(json!({
            "access_token": "tok123",
            "token_type": "bearer",
            "expires_in": 3600
        }))
    }

    async fn stub_profile_endpoint(
        state: web::Data<ProviderState>,
        query: web::Query<ProfileQuery>,
    ) -> HttpResponse {
        state.profile_hits.fetch_add(1, Ordering::SeqCst);

        assert_eq!(query.fields, "id,name,email");

        if state.profile_status != 200 {
            return HttpResponse::build(StatusCode::from_u16(state.profile_status).unwrap())
                .json(json!({"error": "provider rejected"}));
        }

        if query.access_token != "tok123" {
            return HttpResponse::Unauthorized().json(json!({"error": "invalid token"}));
        }

        HttpResponse::Ok().json(json!({"id": "1", "name": "Ada", "email": "ada@x.com"}))
    }

    /// 스텁 Facebook 서버를 임의 포트에 띄우고 (base_url, 상태 핸들)을 반환합니다.
    async fn spawn_provider(
        token_status: u16,
        profile_status: u16,
    ) -> (String, web::Data<ProviderState>) {
        let state = web::Data::new(ProviderState::new(token_status, profile_status));
        let server_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .route("/oauth/access_token", web::get().to(stub_token_endpoint))
                .route("/me", web::get().to(stub_profile_endpoint))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        (format!("http://{}", addr), state)
    }

    fn test_config(base_url: &str) -> FacebookOAuthConfig {
        FacebookOAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: "secret-456".to_string(),
            redirect_uri: "http://localhost:8001/login/facebook/callback".to_string(),
            auth_uri: format!("{}/dialog/oauth", base_url),
            token_uri: format!("{}/oauth/access_token", base_url),
            profile_uri: format!("{}/me", base_url),
            scope: "email".to_string(),
            state_secret: "test-state-secret".to_string(),
            state_timeout_minutes: 10,
            provider_timeout: Duration::from_secs(5),
        }
    }

    /// build_redirect가 반환한 URL에서 state 파라미터를 추출합니다.
    fn state_from_redirect(url: &str) -> String {
        url.split("state=")
            .nth(1)
            .unwrap()
            .split('&')
            .next()
            .unwrap()
            .to_string()
    }

    #[actix_web::test]
    async fn test_successful_exchange_returns_profile() {
        let (base_url, provider) = spawn_provider(200, 200).await;
        let service = FacebookAuthService::new(test_config(&base_url));

        let state = state_from_redirect(&service.build_redirect().unwrap());
        let profile = service
            .exchange_code_for_profile("code-abc", &state)
            .await
            .unwrap();

        assert_eq!(profile.id, "1");
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email.as_deref(), Some("ada@x.com"));
        assert_eq!(provider.token_hits.load(Ordering::SeqCst), 1);
        assert_eq!(provider.profile_hits.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_token_endpoint_failure_skips_profile_fetch() {
        let (base_url, provider) = spawn_provider(401, 200).await;
        let service = FacebookAuthService::new(test_config(&base_url));

        let state = state_from_redirect(&service.build_redirect().unwrap());
        let result = service.exchange_code_for_profile("code-abc", &state).await;

        assert!(matches!(result, Err(AppError::TokenExchangeError(401))));
        // 토큰 교환이 실패하면 프로필 엔드포인트는 호출되지 않음
        assert_eq!(provider.profile_hits.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_profile_endpoint_failure_passes_status_through() {
        let (base_url, _provider) = spawn_provider(200, 403).await;
        let service = FacebookAuthService::new(test_config(&base_url));

        let state = state_from_redirect(&service.build_redirect().unwrap());
        let result = service.exchange_code_for_profile("code-abc", &state).await;

        assert!(matches!(result, Err(AppError::ProfileFetchError(403))));
    }

    #[actix_web::test]
    async fn test_replayed_authorization_code_is_rejected() {
        let (base_url, _provider) = spawn_provider(200, 200).await;
        let service = FacebookAuthService::new(test_config(&base_url));

        let state = state_from_redirect(&service.build_redirect().unwrap());
        service
            .exchange_code_for_profile("single-use-code", &state)
            .await
            .unwrap();

        // 같은 code로 두 번째 교환 시도는 프로바이더가 거부
        let state = state_from_redirect(&service.build_redirect().unwrap());
        let replay = service
            .exchange_code_for_profile("single-use-code", &state)
            .await;

        assert!(matches!(replay, Err(AppError::TokenExchangeError(400))));
    }

    #[actix_web::test]
    async fn test_invalid_state_fails_before_any_provider_call() {
        let (base_url, provider) = spawn_provider(200, 200).await;
        let service = FacebookAuthService::new(test_config(&base_url));

        let result = service
            .exchange_code_for_profile("code-abc", "forged-state")
            .await;

        assert!(matches!(result, Err(AppError::InvalidStateError(_))));
        assert_eq!(provider.token_hits.load(Ordering::SeqCst), 0);
        assert_eq!(provider.profile_hits.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_unreachable_provider_maps_to_network_error() {
        // 아무것도 듣고 있지 않은 주소
        let service = FacebookAuthService::new(test_config("http://127.0.0.1:9"));

        let state = state_from_redirect(&service.build_redirect().unwrap());
        let result = service.exchange_code_for_profile("code-abc", &state).await;

        assert!(matches!(
            result,
            Err(AppError::NetworkError(_)) | Err(AppError::ProviderTimeoutError(_))
        ));
    }

    #[test]
    fn test_redirect_url_contains_each_parameter_exactly_once() {
        let service = FacebookAuthService::new(test_config("http://stub"));
        let url = service.build_redirect().unwrap();

        assert!(url.starts_with("http://stub/dialog/oauth?"));
        assert_eq!(url.matches("client_id=client-123").count(), 1);
        assert_eq!(url.matches("scope=email").count(), 1);
        assert_eq!(url.matches("response_type=code").count(), 1);
        assert_eq!(url.matches("state=").count(), 1);

        // redirect_uri는 URL 인코딩되어 포함됨
        let encoded_redirect =
            urlencoding::encode("http://localhost:8001/login/facebook/callback").into_owned();
        assert_eq!(url.matches(&encoded_redirect).count(), 1);
    }
}
