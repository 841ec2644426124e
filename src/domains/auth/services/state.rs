// Auth domain state
// 인증 도메인 상태
use std::sync::Arc;
use crate::domains::auth::services::{AuthenticationService, TokenService};
use crate::shared::config::AuthConfig;
use crate::shared::database::{Database, RefreshTokenRepository, UserRepository};
use crate::shared::errors::ConfigurationError;

/// Auth domain state
/// 인증 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct AuthState {
    pub authentication_service: AuthenticationService,
}

impl AuthState {
    /// Create AuthState with database and configuration
    /// 서명 키가 잘못 설정되어 있으면 여기서 실패 (시작 시점)
    pub fn new(db: &Database, config: &AuthConfig) -> Result<Self, ConfigurationError> {
        let token_service = TokenService::new(&config.token)?;

        let authentication_service = AuthenticationService::new(
            Arc::new(UserRepository::new(db.pool().clone())),
            Arc::new(RefreshTokenRepository::new(db.pool().clone())),
            token_service,
            &config.token,
            config.clients.clone(),
        );

        Ok(Self {
            authentication_service,
        })
    }
}
