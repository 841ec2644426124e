use chrono::{DateTime, Utc};

/// 사용자 모델 (identity 시스템이 관리하는 레코드)
/// User record owned by the identity collaborator
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
