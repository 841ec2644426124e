use crate::shared::config::AuthConfig;
use crate::shared::database::Database;
use crate::domains::auth::services::state::AuthState;
use crate::shared::errors::ConfigurationError;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 서비스 그래프는 여기서 명시적으로 조립됨 (DI 컨테이너 없음)
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub auth_state: AuthState,
}

impl AppState {
    /// Create AppState with database and configuration
    pub fn new(db: Database, config: &AuthConfig) -> Result<Self, ConfigurationError> {
        let auth_state = AuthState::new(&db, config)?;

        Ok(Self { db, auth_state })
    }
}
