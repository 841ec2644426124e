// Routes module: 라우팅 설정
// Routes module: combines all domain routers

use axum::Router;
use crate::shared::services::AppState;

use crate::domains::auth::routes::create_auth_router;

/// Create main router
/// 메인 라우터 생성
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/auth", create_auth_router())
}
