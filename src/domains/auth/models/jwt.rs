use serde::{Deserialize, Serialize};

/// 주체별 클레임 (시간 관련 클레임 제외)
/// Principal-specific claims, before issuer and lifetime are attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Subject (사용자 ID 또는 클라이언트 ID)
    pub sub: String,

    /// 이메일 (사용자 토큰만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// 사용자 이름 (사용자 토큰만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Audience 목록 (다중 값)
    #[serde(default)]
    pub aud: Vec<String>,

    /// 토큰 고유 ID
    /// Unique token identifier, fresh for every token
    pub jti: String,
}

/// JWT Claims (토큰에 포함될 데이터)
/// JWT claims as they appear on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub claims: ClaimSet,

    /// 발급자
    /// Issuer
    pub iss: String,

    /// 만료 시간 (Unix timestamp)
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// 이 시간 이전에는 무효 (Unix timestamp)
    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// 발급 시간 (Unix timestamp)
    /// Issued at (Unix timestamp)
    pub iat: i64,
}
