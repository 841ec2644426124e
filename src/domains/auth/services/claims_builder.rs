use uuid::Uuid;
use crate::domains::auth::models::{ClaimSet, ClientPrincipal, UserPrincipal};

/// 사용자 토큰용 클레임 생성
/// Build the claim set for a user-principal token
///
/// audience는 항목마다 하나의 `aud` 값이 됨.
pub fn build_user_claims(principal: &UserPrincipal, audiences: &[String]) -> ClaimSet {
    ClaimSet {
        sub: principal.id.to_string(),
        email: Some(principal.email.clone()),
        name: Some(principal.username.clone()),
        aud: audiences.to_vec(),
        jti: new_jti(),
    }
}

/// 클라이언트 토큰용 클레임 생성
/// Build the claim set for a client-principal token
pub fn build_client_claims(principal: &ClientPrincipal) -> ClaimSet {
    ClaimSet {
        sub: principal.id.clone(),
        email: None,
        name: None,
        aud: principal.audiences.clone(),
        jti: new_jti(),
    }
}

fn new_jti() -> String {
    Uuid::new_v4().to_string()
}
