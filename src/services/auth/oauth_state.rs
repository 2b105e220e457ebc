//! OAuth state 생성 및 검증
//!
//! Authorization code 플로우의 CSRF 방지를 위한 `state` 파라미터를 담당합니다.
//! 서버는 요청 간 공유 상태를 갖지 않으므로(세션/캐시 없음) state는
//! 무상태(stateless) 서명 방식으로 검증합니다:
//!
//! ```text
//! state = <unix-timestamp>.<uuid-nonce>.<base64url(sha256("ts:nonce:secret"))>
//! ```
//!
//! 콜백에서는 서명을 재계산하여 위조 여부를 확인하고,
//! 타임스탬프로 만료 여부(기본 10분)를 확인합니다.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// 무상태 OAuth state 서명기
///
/// 시크릿과 유효 시간만 들고 있으며 요청 간 상태를 저장하지 않습니다.
#[derive(Debug, Clone)]
pub struct StateSigner {
    secret: String,
    timeout_secs: u64,
}

impl StateSigner {
    pub fn new(secret: String, timeout_minutes: u64) -> Self {
        Self {
            secret,
            timeout_secs: timeout_minutes * 60,
        }
    }

    /// 새 state 값을 생성합니다.
    ///
    /// nonce로 UUID v4를 사용하므로 같은 초에 생성된 state도 서로 다릅니다.
    pub fn generate(&self) -> AppResult<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_secs();

        let nonce = Uuid::new_v4().simple().to_string();
        let signature = self.signature(timestamp, &nonce);

        Ok(format!("{}.{}.{}", timestamp, nonce, signature))
    }

    /// 콜백으로 돌아온 state 값을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidStateError` - 형식 오류, 서명 불일치, 만료
    pub fn verify(&self, state: &str) -> AppResult<()> {
        let mut parts = state.splitn(3, '.');
        let (timestamp, nonce, signature) = match (parts.next(), parts.next(), parts.next()) {
            (Some(ts), Some(nonce), Some(sig)) => (ts, nonce, sig),
            _ => {
                return Err(AppError::InvalidStateError(
                    "malformed state parameter".to_string(),
                ));
            }
        };

        let timestamp: u64 = timestamp.parse().map_err(|_| {
            AppError::InvalidStateError("malformed state timestamp".to_string())
        })?;

        if self.signature(timestamp, nonce) != signature {
            return Err(AppError::InvalidStateError(
                "state signature mismatch".to_string(),
            ));
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_secs();

        if now.saturating_sub(timestamp) > self.timeout_secs {
            return Err(AppError::InvalidStateError("state expired".to_string()));
        }

        Ok(())
    }

    fn signature(&self, timestamp: u64, nonce: &str) -> String {
        let state_data = format!("{}:{}:{}", timestamp, nonce, self.secret);
        let digest = Sha256::digest(state_data.as_bytes());

        URL_SAFE_NO_PAD.encode(digest)
    }
}
