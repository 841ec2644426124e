use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domains::auth::models::{AccessToken, TokenPair};

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    /// Email address
    /// 이메일 주소
    #[schema(example = "user@example.com")]
    pub email: String,

    /// Password
    /// 비밀번호
    #[schema(example = "password123")]
    pub password: String,
}

// 클라이언트 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ClientLoginRequest)]
pub struct ClientLoginRequest {
    /// Client ID
    /// 클라이언트 ID
    #[schema(example = "SpaApp")]
    pub client_id: String,

    /// Client secret
    /// 클라이언트 시크릿
    #[schema(example = "secret")]
    pub client_secret: String,
}

// 토큰 갱신/폐기 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RefreshTokenRequest)]
pub struct RefreshTokenRequest {
    /// Refresh Token
    /// 리프레시 토큰
    #[schema(example = "q2P1oV0m3yJt4c1sQ5nHcQ0xq8Zb0m8pX1rYkO9s6lE=")]
    pub refresh_token: String,
}

// 사용자 토큰 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = TokenDto)]
pub struct TokenDto {
    /// JWT Access Token (짧은 수명)
    /// JWT Access Token (short lifetime)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Access Token 만료 시각
    pub access_token_expiration: DateTime<Utc>,

    /// Refresh Token (긴 수명, DB에 저장)
    /// Refresh Token (long lifetime, stored in database)
    pub refresh_token: String,

    /// Refresh Token 만료 시각
    pub refresh_token_expiration: DateTime<Utc>,
}

// 클라이언트 토큰 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ClientTokenDto)]
pub struct ClientTokenDto {
    /// JWT Access Token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Access Token 만료 시각
    pub access_token_expiration: DateTime<Utc>,
}

impl From<TokenPair> for TokenDto {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token.token,
            access_token_expiration: pair.access_token.expires_at,
            refresh_token: pair.refresh_token.code,
            refresh_token_expiration: pair.refresh_token.expires_at,
        }
    }
}

impl From<AccessToken> for ClientTokenDto {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.token,
            access_token_expiration: token.expires_at,
        }
    }
}
