use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use subtle::ConstantTimeEq;
use crate::domains::auth::models::{
    AccessToken, Client, ClientPrincipal, RefreshToken, RefreshTokenRecord, TokenPair,
    UserPrincipal,
};
use crate::domains::auth::services::TokenService;
use crate::shared::config::TokenOptions;
use crate::shared::database::{IdentityVerifier, RefreshTokenStore};
use crate::shared::errors::{AuthError, PersistenceError};

/// 사용자당 insert 경쟁에서 졌을 때 허용하는 재시도 횟수
/// Retries allowed after losing the per-user insert race
pub const MAX_UPSERT_RETRIES: usize = 1;

/// 인증 서비스
/// Authentication orchestrator: verifies principals, mints tokens,
/// and keeps exactly one refresh token record per user.
///
/// 요청 간에 공유되는 가변 상태는 없음 (저장소만 공유).
#[derive(Clone)]
pub struct AuthenticationService {
    identity: Arc<dyn IdentityVerifier>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    token_service: TokenService,
    clients: Arc<[Client]>,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
}

impl AuthenticationService {
    // 생성자 (모든 협력 객체를 명시적으로 주입)
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        token_service: TokenService,
        options: &TokenOptions,
        clients: Vec<Client>,
    ) -> Self {
        Self {
            identity,
            refresh_tokens,
            token_service,
            clients: clients.into(),
            access_token_expiration: options.access_token_expiration,
            refresh_token_expiration: options.refresh_token_expiration,
        }
    }

    /// 이메일/비밀번호로 토큰 발급
    /// Issue a token pair for email/password credentials
    ///
    /// 없는 이메일과 틀린 비밀번호는 같은 `InvalidCredentials`로 응답.
    pub async fn create_token(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        // 1. 이메일로 사용자 조회
        // 없는 이메일도 더미 해시로 같은 비용을 치름
        let user = match self.identity.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.identity.verify_dummy_password(password).await;
                tracing::warn!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        // 2. 비밀번호 검증
        if !self.identity.verify_password(&user, password).await {
            tracing::warn!(user_id = user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        // 3. 토큰 발급
        let principal = UserPrincipal::from(&user);
        let pair = self.token_service.mint_user_token(
            &principal,
            Utc::now(),
            self.access_token_expiration,
            self.refresh_token_expiration,
        )?;

        // 4. Refresh Token 저장 (있으면 갱신, 없으면 추가) + 커밋
        self.store_refresh_token(user.id, &pair.refresh_token).await?;

        tracing::info!(user_id = user.id, "Issued token pair");
        Ok(pair)
    }

    /// 클라이언트 자격증명으로 토큰 발급 (저장 없음)
    /// Issue a stateless access token for a configured machine client
    pub fn create_token_by_client(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, AuthError> {
        let client = self
            .clients
            .iter()
            .find(|client| {
                client.id == client_id
                    && bool::from(client.secret.as_bytes().ct_eq(client_secret.as_bytes()))
            })
            .ok_or_else(|| {
                tracing::warn!(client_id, "Client credentials rejected");
                AuthError::ClientNotFound
            })?;

        let principal = ClientPrincipal::from(client);
        let token = self.token_service.mint_client_token(
            &principal,
            Utc::now(),
            self.access_token_expiration,
        )?;

        tracing::info!(client_id = %principal.id, "Issued client token");
        Ok(token)
    }

    /// Refresh Token으로 새 토큰 쌍 발급 (Rotation)
    /// Redeem a refresh code for a new pair, rotating the code in place
    ///
    /// 한 번 사용된 코드는 다시 사용할 수 없음.
    /// 작업 단위를 연 채로 사용자 조회를 하지 않음: 조회용 작업 단위는 소유자 조회 전에 끝나고,
    /// 그 사이 레코드가 바뀌었으면 쓰기 작업 단위의 compare-and-swap이 실패함.
    pub async fn create_token_by_refresh_token(&self, code: &str) -> Result<TokenPair, AuthError> {
        let now = Utc::now();

        // 1. 코드로 조회 (없거나 만료되면 실패)
        let record = match self.find_refresh_record(code).await? {
            Some(record) if !record.is_expired(now) => record,
            Some(record) => {
                tracing::debug!(user_id = record.user_id, "Refresh token expired");
                return Err(AuthError::RefreshTokenInvalid);
            }
            None => return Err(AuthError::RefreshTokenInvalid),
        };

        // 2. 소유자 조회 (없으면 즉시 실패)
        let user = self
            .identity
            .find_by_id(record.user_id)
            .await?
            .ok_or(AuthError::UserNotFound { id: record.user_id })?;

        // 3. 새 토큰 발급
        let principal = UserPrincipal::from(&user);
        let pair = self.token_service.mint_user_token(
            &principal,
            now,
            self.access_token_expiration,
            self.refresh_token_expiration,
        )?;

        // 4. 같은 레코드를 새 코드로 교체 (다른 요청이 먼저 교체했으면 실패)
        let mut uow = self.refresh_tokens.begin().await?;
        let rotated = uow
            .rotate(code, &pair.refresh_token.code, pair.refresh_token.expires_at)
            .await?;
        if !rotated {
            tracing::warn!(user_id = user.id, "Refresh token already rotated by a concurrent request");
            return Err(AuthError::RefreshTokenInvalid);
        }

        uow.commit().await?;

        tracing::info!(user_id = user.id, "Rotated refresh token");
        Ok(pair)
    }

    /// Refresh Token 폐기
    /// Revoke (delete) a refresh token
    pub async fn revoke_refresh_token(&self, code: &str) -> Result<(), AuthError> {
        let mut uow = self.refresh_tokens.begin().await?;

        if !uow.delete_by_code(code).await? {
            return Err(AuthError::RefreshTokenInvalid);
        }

        uow.commit().await?;

        tracing::info!("Revoked refresh token");
        Ok(())
    }

    /// Refresh Token 저장 (사용자당 하나)
    /// Upsert the user's refresh record in its own unit of work.
    ///
    /// 동시 로그인으로 insert가 유니크 제약에 걸리면 새 작업 단위에서 한 번 재시도하며,
    /// 재시도 시에는 먼저 저장된 행을 보고 갱신하게 됨.
    async fn store_refresh_token(
        &self,
        user_id: u64,
        refresh_token: &RefreshToken,
    ) -> Result<(), AuthError> {
        let mut attempt = 0;
        loop {
            match self
                .try_store_refresh_token(user_id, &refresh_token.code, refresh_token.expires_at)
                .await
            {
                Err(PersistenceError::Conflict) if attempt < MAX_UPSERT_RETRIES => {
                    attempt += 1;
                    tracing::warn!(user_id, attempt, "Refresh token insert lost a race, retrying as update");
                }
                Err(e) => {
                    tracing::error!(user_id, "Failed to store refresh token: {}", e);
                    return Err(e.into());
                }
                Ok(()) => return Ok(()),
            }
        }
    }

    /// 읽기 전용 작업 단위에서 코드 조회 (커밋으로 연결을 바로 반환)
    async fn find_refresh_record(
        &self,
        code: &str,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        let mut uow = self.refresh_tokens.begin().await?;
        let record = uow.find_by_code(code).await?;
        uow.commit().await?;
        Ok(record)
    }

    async fn try_store_refresh_token(
        &self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        let mut uow = self.refresh_tokens.begin().await?;
        uow.upsert(user_id, code, expires_at).await?;
        uow.commit().await
    }
}
