use chrono::{DateTime, Utc};

/// Refresh Token 레코드 (사용자당 하나)
/// Persisted refresh token record, at most one per user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub user_id: u64,
    /// 저장소 구현에 따라 원본 코드 또는 해시
    /// Raw code or its digest, depending on the store
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// 만료 여부 (사용 시점에 지연 확인)
    /// Expiry is checked lazily at redemption time
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
