use chrono::{DateTime, Utc};

/// 서명된 Access Token
/// Signed, time-bounded access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// 불투명 Refresh Token (DB 키로만 사용, 파싱하지 않음)
/// Opaque refresh token; only ever used as a lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// 사용자 로그인/갱신 결과
/// Access + refresh pair returned to users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}
