// src/domains/auth/services/token_service.rs
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use crate::domains::auth::models::{
    AccessToken, ClaimSet, Claims, ClientPrincipal, RefreshToken, TokenPair, UserPrincipal,
};
use crate::domains::auth::services::{
    build_client_claims, build_user_claims, SigningKey, SIGNING_ALGORITHM,
};
use crate::shared::config::TokenOptions;
use crate::shared::errors::{AuthError, ConfigurationError};

/// Refresh Token 원본 바이트 수 (256비트 엔트로피)
/// Raw refresh code length: 256 bits of entropy
pub const REFRESH_CODE_BYTES: usize = 32;

/// 토큰 발급 서비스
/// Token minter: signs access tokens and generates opaque refresh codes
#[derive(Clone, Debug)]
pub struct TokenService {
    signing_key: SigningKey,
    issuer: String,
    audiences: Vec<String>,
}

impl TokenService {
    /// Token Service 생성
    /// 시크릿이 짧으면 시작 시점에 실패
    pub fn new(options: &TokenOptions) -> Result<Self, ConfigurationError> {
        Ok(Self {
            signing_key: SigningKey::derive(&options.security_key)?,
            issuer: options.issuer.clone(),
            audiences: options.audiences.clone(),
        })
    }

    /// 사용자 토큰 쌍 발급
    /// Mint an access + refresh pair for a user
    ///
    /// 만료 시각은 `now + ttl` 그대로, JWT의 `exp`/`nbf`/`iat`만 초 단위(내림)로 기록됨.
    pub fn mint_user_token(
        &self,
        principal: &UserPrincipal,
        now: DateTime<Utc>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, ConfigurationError> {
        let access_expires_at = now + access_ttl;
        let refresh_expires_at = now + refresh_ttl;

        let claims = build_user_claims(principal, &self.audiences);
        let token = self.sign(claims, now, access_expires_at)?;

        Ok(TokenPair {
            access_token: AccessToken {
                token,
                expires_at: access_expires_at,
            },
            refresh_token: RefreshToken {
                code: Self::generate_refresh_code(),
                expires_at: refresh_expires_at,
            },
        })
    }

    /// 클라이언트 토큰 발급 (Refresh Token 없음)
    /// Mint a stateless access token for a machine client
    pub fn mint_client_token(
        &self,
        principal: &ClientPrincipal,
        now: DateTime<Utc>,
        access_ttl: Duration,
    ) -> Result<AccessToken, ConfigurationError> {
        let expires_at = now + access_ttl;

        let claims = build_client_claims(principal);
        let token = self.sign(claims, now, expires_at)?;

        Ok(AccessToken { token, expires_at })
    }

    /// Refresh Token 생성 (32바이트 난수, base64)
    /// Generate an opaque refresh code from the OS CSPRNG
    pub fn generate_refresh_code() -> String {
        let mut bytes = [0u8; REFRESH_CODE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    /// Access Token 검증 (서명, 발급자, audience, exp/nbf, 허용 오차 0)
    /// Verify an access token for the given audience with zero clock leeway
    pub fn verify_access_token(&self, token: &str, audience: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);

        let token_data = decode::<Claims>(token, self.signing_key.decoding_key(), &validation)
            .map_err(|e| {
                tracing::debug!("Access token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }

    fn sign(
        &self,
        claims: ClaimSet,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, ConfigurationError> {
        let claims = Claims {
            claims,
            iss: self.issuer.clone(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, self.signing_key.encoding_key())
            .map_err(|e| ConfigurationError::Signing(e.to_string()))
    }
}
