//! # Domain Module
//!
//! API 경계의 DTO와 외부 시스템(Facebook) 통합 모델을 정의합니다.

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
