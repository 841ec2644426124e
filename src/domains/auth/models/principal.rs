use crate::domains::auth::models::{Client, User};

/// 사용자 주체
/// Authenticated end-user identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrincipal {
    pub id: u64,
    pub email: String,
    pub username: String,
}

/// 클라이언트 주체
/// Authenticated machine-client identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPrincipal {
    pub id: String,
    pub audiences: Vec<String>,
}

impl From<&User> for UserPrincipal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            // username이 없으면 이메일을 이름으로 사용
            username: user.username.clone().unwrap_or_else(|| user.email.clone()),
        }
    }
}

impl From<&Client> for ClientPrincipal {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            audiences: client.audiences.clone(),
        }
    }
}
