use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth_server::domains::auth::models::*;
use auth_server::routes::create_router;
use auth_server::shared::config::AuthConfig;
use auth_server::shared::database::Database;
use auth_server::shared::services::AppState;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_server::domains::auth::handlers::auth_handler::create_token,
        auth_server::domains::auth::handlers::auth_handler::create_token_by_client,
        auth_server::domains::auth::handlers::auth_handler::create_token_by_refresh_token,
        auth_server::domains::auth::handlers::auth_handler::revoke_refresh_token
    ),
    components(schemas(
        LoginRequest,
        ClientLoginRequest,
        RefreshTokenRequest,
        TokenDto,
        ClientTokenDto
    )),
    tags(
        (name = "Auth", description = "Token issuance, refresh and revocation")
    ),
    info(
        title = "Auth Server",
        description = "Issues, rotates and revokes bearer tokens",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 설정 로드 (시작 시 한 번만)
    let config = AuthConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        issuer = %config.token.issuer,
        clients = config.clients.len(),
        "Configuration loaded"
    );

    // DB 연결
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(db, &config).context("Failed to initialize AppState")?;

    let mut app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // CORS 설정 (origin이 설정된 경우만)
    if let Some(origin) = &config.cors_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .context("CORS_ORIGIN is not a valid header value")?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ]);
        app = app.layer(cors);
    }

    let app = app.with_state(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server running on http://{}", config.bind_addr);
    tracing::info!("Swagger UI available at http://{}/api", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
