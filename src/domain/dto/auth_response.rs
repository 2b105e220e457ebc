use serde::{Deserialize, Serialize};

use crate::domain::models::facebook_user::FacebookUserProfile;

/// Facebook 토큰 엔드포인트 응답
///
/// `access_token`은 필수입니다. 200 응답인데 `access_token`이 없으면
/// 역직렬화 단계에서 실패하여, 인증되지 않은 프로필 요청으로 이어지지 않습니다.
#[derive(Debug, Deserialize)]
pub struct FacebookTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
}

/// 콜백 성공 응답 본문: `{"user_data": {...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDataResponse {
    pub user_data: FacebookUserProfile,
}
