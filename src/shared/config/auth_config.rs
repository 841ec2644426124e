use chrono::Duration;
use crate::domains::auth::models::Client;
use crate::shared::errors::ConfigurationError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3002";
const DEFAULT_ISSUER: &str = "www.authserver.com";
const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 5;
const DEFAULT_REFRESH_TOKEN_MINUTES: i64 = 600;

/// 토큰 발급 옵션
/// Token issuance options
#[derive(Clone)]
pub struct TokenOptions {
    /// 발급자 (iss)
    pub issuer: String,
    /// 사용자 토큰의 audience 목록 (aud)
    pub audiences: Vec<String>,
    /// Access Token 수명
    pub access_token_expiration: Duration,
    /// Refresh Token 수명
    pub refresh_token_expiration: Duration,
    /// HS256 서명 시크릿
    pub security_key: String,
}

impl std::fmt::Debug for TokenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenOptions")
            .field("issuer", &self.issuer)
            .field("audiences", &self.audiences)
            .field("access_token_expiration", &self.access_token_expiration)
            .field("refresh_token_expiration", &self.refresh_token_expiration)
            .field("security_key", &"<redacted>")
            .finish()
    }
}

/// 인증 서버 전체 설정
/// Auth server configuration
///
/// 프로세스 시작 시 한 번만 읽음. 변경하려면 재시작 필요.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PostgreSQL 연결 문자열
    pub database_url: String,
    /// 리스닝 주소
    pub bind_addr: String,
    /// CORS 허용 origin (없으면 CORS 레이어 미적용)
    pub cors_origin: Option<String>,
    pub token: TokenOptions,
    /// 정적으로 등록된 클라이언트 목록
    pub clients: Vec<Client>,
}

impl AuthConfig {
    /// 환경변수에서 설정 로드
    /// Load configuration from environment variables
    ///
    /// # 환경 변수
    /// * `DATABASE_URL` - 필수
    /// * `TOKEN_SECURITY_KEY` - 필수, 32바이트 이상
    /// * `BIND_ADDR` - 기본값 `0.0.0.0:3002`
    /// * `TOKEN_ISSUER` - 기본값 `www.authserver.com`
    /// * `TOKEN_AUDIENCES` - 쉼표 구분, 기본값은 issuer와 같음
    /// * `ACCESS_TOKEN_EXPIRATION_MINUTES` - 기본값 5
    /// * `REFRESH_TOKEN_EXPIRATION_MINUTES` - 기본값 600
    /// * `AUTH_CLIENTS` - `[{"id":..,"secret":..,"audiences":[..]}]` 형식의 JSON
    /// * `CORS_ORIGIN` - 선택
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로 설정 로드 (테스트용으로도 사용)
    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or(ConfigurationError::Missing("DATABASE_URL"))?;

        let security_key = lookup("TOKEN_SECURITY_KEY")
            .ok_or(ConfigurationError::Missing("TOKEN_SECURITY_KEY"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let issuer = lookup("TOKEN_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        let audiences = match lookup("TOKEN_AUDIENCES") {
            Some(raw) => parse_audiences(&raw)?,
            None => vec![issuer.clone()],
        };

        let access_minutes = parse_minutes(
            "ACCESS_TOKEN_EXPIRATION_MINUTES",
            lookup("ACCESS_TOKEN_EXPIRATION_MINUTES"),
            DEFAULT_ACCESS_TOKEN_MINUTES,
        )?;
        let refresh_minutes = parse_minutes(
            "REFRESH_TOKEN_EXPIRATION_MINUTES",
            lookup("REFRESH_TOKEN_EXPIRATION_MINUTES"),
            DEFAULT_REFRESH_TOKEN_MINUTES,
        )?;

        let clients = match lookup("AUTH_CLIENTS") {
            Some(raw) => parse_clients(&raw)?,
            None => Vec::new(),
        };

        let cors_origin = lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty());

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin,
            token: TokenOptions {
                issuer,
                audiences,
                access_token_expiration: Duration::minutes(access_minutes),
                refresh_token_expiration: Duration::minutes(refresh_minutes),
                security_key,
            },
            clients,
        })
    }
}

fn parse_audiences(raw: &str) -> Result<Vec<String>, ConfigurationError> {
    let audiences: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|aud| !aud.is_empty())
        .map(str::to_string)
        .collect();

    if audiences.is_empty() {
        return Err(ConfigurationError::Invalid {
            name: "TOKEN_AUDIENCES",
            reason: "at least one audience is required".to_string(),
        });
    }
    Ok(audiences)
}

fn parse_minutes(
    name: &'static str,
    raw: Option<String>,
    default: i64,
) -> Result<i64, ConfigurationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let minutes: i64 = raw.trim().parse().map_err(|_| ConfigurationError::Invalid {
        name,
        reason: format!("'{}' is not a number of minutes", raw),
    })?;

    if minutes <= 0 {
        return Err(ConfigurationError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(minutes)
}

fn parse_clients(raw: &str) -> Result<Vec<Client>, ConfigurationError> {
    let clients: Vec<Client> =
        serde_json::from_str(raw).map_err(|e| ConfigurationError::Invalid {
            name: "AUTH_CLIENTS",
            reason: e.to_string(),
        })?;

    if let Some(client) = clients.iter().find(|c| c.id.is_empty() || c.secret.is_empty()) {
        return Err(ConfigurationError::Invalid {
            name: "AUTH_CLIENTS",
            reason: format!("client '{}' needs a non-empty id and secret", client.id),
        });
    }
    Ok(clients)
}
