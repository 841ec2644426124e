use thiserror::Error;
use crate::shared::errors::{ConfigurationError, PersistenceError};

/// 인증 관련 에러
/// Authentication-related errors
///
/// 비즈니스 실패(잘못된 비밀번호, 없는 토큰 등)는 고정 메시지를 갖고,
/// 계정 존재 여부를 드러내지 않음.
#[derive(Error, Debug)]
pub enum AuthError {
    /// 잘못된 이메일 또는 비밀번호
    /// Unknown email or wrong password (never distinguished)
    #[error("Email or password is wrong")]
    InvalidCredentials,

    /// 등록되지 않은 클라이언트 또는 잘못된 시크릿
    /// Unknown client id or wrong client secret
    #[error("ClientId or ClientSecret not found")]
    ClientNotFound,

    /// 없거나 만료된 Refresh Token
    /// Refresh token not found, expired, or already rotated away
    #[error("Refresh token not found")]
    RefreshTokenInvalid,

    /// Refresh Token 소유자를 찾을 수 없음
    /// Owner of a refresh token no longer exists
    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    /// 잘못된 또는 만료된 Access Token
    /// Invalid or expired access token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 설정 에러 (치명적)
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// 데이터베이스 에러 (치명적)
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl AuthError {
    /// HTTP 상태 코드
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 400,
            Self::InvalidToken => 401,
            Self::ClientNotFound | Self::RefreshTokenInvalid | Self::UserNotFound { .. } => 404,
            Self::Configuration(_) | Self::Persistence(_) => 500,
        }
    }

    /// 클라이언트에게 노출되는 메시지 (내부 정보 제외)
    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::Configuration(_) | Self::Persistence(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// 비즈니스 실패인지 (호출자가 분기해야 하는 정상적인 결과)
    /// Whether this is an expected business outcome rather than a fatal failure
    pub fn is_business_failure(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Persistence(_))
    }
}
