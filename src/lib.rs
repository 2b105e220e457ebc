//! Facebook OAuth 로그인 서비스
//!
//! Rust 기반의 OAuth2 "Login with Facebook" 백엔드 서비스입니다.
//! Authorization Code Grant 플로우(리다이렉트 → 콜백 → 토큰 교환 → 프로필 조회)를
//! 구현하며, 세션이나 영구 저장소 없이 요청 단위로 무상태로 동작합니다.
//!
//! # Features
//!
//! - **로그인 리다이렉트**: Facebook 인증 페이지로의 302 리다이렉트 생성
//! - **콜백 처리**: authorization code를 access token으로 교환 후 프로필 조회
//! - **State 검증**: 무상태 서명 기반 CSRF 방지
//! - **에러 전달**: Facebook의 실패 상태 코드를 그대로 전달, 네트워크 실패는 502/504
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /login/facebook, /login/facebook/callback, /health
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 쿼리 추출, 리다이렉트/JSON 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    LoginFlow    │ ← {build_redirect, exchange_code_for_profile} 인터페이스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Facebook OAuth  │ ← 토큰/프로필 엔드포인트 (외부)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use facebook_auth_service::config::FacebookOAuthConfig;
//! use facebook_auth_service::services::auth::{FacebookAuthService, LoginFlow};
//!
//! let config = FacebookOAuthConfig::from_env()?;
//! let flow: Arc<dyn LoginFlow> = Arc::new(FacebookAuthService::new(config));
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;
