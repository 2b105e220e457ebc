use serde::{Deserialize, Serialize};

/// Facebook 사용자 프로필
///
/// `fields=id,name,email`로 요청한 프로필 정보입니다.
/// 세션이나 저장소 없이 조회 즉시 호출자에게 그대로 반환됩니다.
/// `email`은 Facebook 계정에 이메일이 없거나 권한이 거부된 경우 누락될 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacebookUserProfile {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
