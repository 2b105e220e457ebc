//! # Domain Models Module
//!
//! 외부 시스템(Facebook Graph API)과의 통합을 위한 모델들입니다.

pub mod facebook_user;

pub use facebook_user::*;
