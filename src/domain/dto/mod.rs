//! # Data Transfer Objects (DTO) Module
//!
//! 클라이언트와 서버 간의 데이터 계약(Contract)을 정의합니다.
//! `auth_request`는 콜백 쿼리 파라미터 매핑을, `auth_response`는
//! 토큰/프로필 응답 본문 매핑을 담당합니다.

pub mod auth_request;
pub mod auth_response;

pub use auth_request::*;
pub use auth_response::*;
