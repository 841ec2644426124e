// Auth domain routes
// 인증 도메인 라우터
use axum::{routing::post, Router};
use crate::domains::auth::handlers::auth_handler;
use crate::shared::services::AppState;

/// Create authentication router
/// 인증 라우터 생성
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/create-token", post(auth_handler::create_token))
        .route("/create-token-by-client", post(auth_handler::create_token_by_client))
        .route(
            "/create-token-by-refresh-token",
            post(auth_handler::create_token_by_refresh_token),
        )
        .route("/revoke-refresh-token", post(auth_handler::revoke_refresh_token))
}
