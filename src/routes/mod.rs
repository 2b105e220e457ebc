//! API 라우트 설정 모듈
//!
//! OAuth 로그인 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Available Routes
//!
//! - `GET /login/facebook` - Facebook 로그인 페이지로 302 리다이렉트
//! - `GET /login/facebook/callback` - 콜백 처리, `{"user_data": {...}}` 응답
//! - `GET /health` - 헬스체크
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
}

/// Facebook 로그인 라우트를 설정합니다
///
/// 인증을 위한 엔드포인트이므로 모두 Public 접근이 가능합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/login/facebook")
            .service(handlers::auth::facebook_login)
            .service(handlers::auth::facebook_callback),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8001/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "facebook_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "provider": "Facebook",
            "flow": "OAuth2 Authorization Code"
        }
    }))
}
