use axum::{extract::State, Json};
use crate::domains::auth::models::{
    ClientLoginRequest, ClientTokenDto, LoginRequest, RefreshTokenRequest, TokenDto,
};
use crate::shared::response::ServiceResponse;
use crate::shared::services::AppState;

// 로그인 핸들러 (이메일/비밀번호)
#[utoipa::path(
    post,
    path = "/api/auth/create-token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenDto),
        (status = 400, description = "Email or password is wrong"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn create_token(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ServiceResponse<TokenDto> {
    let result = app_state
        .auth_state
        .authentication_service
        .create_token(&request.email, &request.password)
        .await;

    ServiceResponse::from_result(result.map(TokenDto::from))
}

// 클라이언트 자격증명 핸들러
#[utoipa::path(
    post,
    path = "/api/auth/create-token-by-client",
    request_body = ClientLoginRequest,
    responses(
        (status = 200, description = "Client access token issued", body = ClientTokenDto),
        (status = 404, description = "ClientId or ClientSecret not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn create_token_by_client(
    State(app_state): State<AppState>,
    Json(request): Json<ClientLoginRequest>,
) -> ServiceResponse<ClientTokenDto> {
    let result = app_state
        .auth_state
        .authentication_service
        .create_token_by_client(&request.client_id, &request.client_secret);

    ServiceResponse::from_result(result.map(ClientTokenDto::from))
}

/// 토큰 갱신 핸들러
/// Refresh token handler
#[utoipa::path(
    post,
    path = "/api/auth/create-token-by-refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = TokenDto),
        (status = 404, description = "Refresh token or its user not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn create_token_by_refresh_token(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ServiceResponse<TokenDto> {
    let result = app_state
        .auth_state
        .authentication_service
        .create_token_by_refresh_token(&request.refresh_token)
        .await;

    ServiceResponse::from_result(result.map(TokenDto::from))
}

/// 토큰 폐기 핸들러
/// Revoke refresh token handler
#[utoipa::path(
    post,
    path = "/api/auth/revoke-refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Refresh token revoked"),
        (status = 404, description = "Refresh token not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn revoke_refresh_token(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ServiceResponse<()> {
    let result = app_state
        .auth_state
        .authentication_service
        .revoke_refresh_token(&request.refresh_token)
        .await;

    ServiceResponse::from_empty_result(result)
}
