use serde::Deserialize;

/// Facebook OAuth 콜백 쿼리 파라미터
///
/// 모든 필드를 `Option`으로 받아 누락 케이스를 프레임워크의 422 대신
/// 핸들러에서 명시적인 에러(`MissingCodeError`, `InvalidStateError`)로 처리합니다.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code (1회용, 즉시 토큰으로 교환됨)
    pub code: Option<String>,

    /// CSRF 방지용 state 값 (로그인 리다이렉트 시 발급된 값)
    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_callback_query_with_code_and_state() {
        let query = Query::<CallbackQuery>::from_query("code=abc123&state=xyz").unwrap();

        assert_eq!(query.code.as_deref(), Some("abc123"));
        assert_eq!(query.state.as_deref(), Some("xyz"));
        assert!(query.error.is_none());
    }

    #[test]
    fn test_callback_query_without_code_still_deserializes() {
        // code 누락은 역직렬화 실패가 아니라 핸들러에서 MissingCodeError로 처리
        let query = Query::<CallbackQuery>::from_query("state=xyz").unwrap();

        assert!(query.code.is_none());
        assert_eq!(query.state.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_callback_query_with_provider_error() {
        let query = Query::<CallbackQuery>::from_query(
            "error=access_denied&error_description=The+user+denied+the+request",
        )
        .unwrap();

        assert_eq!(query.error.as_deref(), Some("access_denied"));
        assert_eq!(
            query.error_description.as_deref(),
            Some("The user denied the request")
        );
    }
}
