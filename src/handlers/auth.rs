//! Facebook 로그인 HTTP 핸들러
//!
//! 핸들러는 HTTP 관심사(쿼리 추출, 리다이렉트/JSON 응답)만 담당하고,
//! 플로우 자체는 주입된 [`LoginFlow`] 구현에 위임합니다.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};

use crate::domain::dto::auth_request::CallbackQuery;
use crate::domain::dto::auth_response::UserDataResponse;
use crate::errors::AppError;
use crate::services::auth::LoginFlow;

/// 사용자를 Facebook 로그인 페이지로 리다이렉트합니다.
///
/// `GET /login/facebook` → 302, `Location`은 `client_id`, `redirect_uri`,
/// `scope=email`, `response_type=code`, `state`를 포함한 인증 URL입니다.
#[get("")]
pub async fn facebook_login(flow: web::Data<dyn LoginFlow>) -> Result<HttpResponse, AppError> {
    let login_url = flow.build_redirect()?;

    log::info!("Facebook 로그인 리다이렉트 생성");

    Ok(HttpResponse::Found()
        .append_header((header::LOCATION, login_url))
        .finish())
}

/// Facebook 콜백을 처리합니다.
///
/// `GET /login/facebook/callback?code=...&state=...` →
/// `200 {"user_data": {...}}` 또는 에러 응답.
///
/// 요청당 처리 순서는 선형입니다: code 추출 → state 검증 →
/// 토큰 교환 → 프로필 조회. 실패 시 해당 단계의 에러가 그대로 전달됩니다.
#[get("/callback")]
pub async fn facebook_callback(
    flow: web::Data<dyn LoginFlow>,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, AppError> {
    // 에러 체크 (사용자가 거부했거나 에러 발생)
    if let Some(error) = &query.error {
        let error_msg = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("Facebook OAuth 에러: {} - {}", error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    let code = query
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or(AppError::MissingCodeError)?;

    let state = query.state.as_deref().ok_or_else(|| {
        AppError::InvalidStateError("missing state parameter".to_string())
    })?;

    let user_data = flow.exchange_code_for_profile(code, state).await?;

    Ok(HttpResponse::Ok().json(UserDataResponse { user_data }))
}
