//! # Configuration Module
//!
//! 환경변수 기반 설정을 담당하는 모듈입니다.
//! 설정은 프로세스 시작 시 한 번 로드되어 불변 구조체로 핸들러에 주입됩니다.

pub mod oauth_config;

pub use oauth_config::*;
