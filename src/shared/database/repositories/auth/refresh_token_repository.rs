use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};
use crate::domains::auth::models::RefreshTokenRecord;
use crate::shared::errors::PersistenceError;

/// Refresh Token 저장소
/// Store that hands out units of work over refresh token records
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// 새 작업 단위 시작
    /// Begin a unit of work; dropping it without `commit` rolls it back
    async fn begin(&self) -> Result<Box<dyn RefreshTokenUnitOfWork>, PersistenceError>;
}

/// 하나의 요청 안에서 수행되는 Refresh Token 읽기/쓰기
/// Reads and writes of one operation, committed atomically
#[async_trait]
pub trait RefreshTokenUnitOfWork: Send {
    /// 사용자의 Refresh Token 조회
    async fn find_by_user(
        &mut self,
        user_id: u64,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError>;

    /// 코드로 Refresh Token 조회
    async fn find_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError>;

    /// 새 레코드 추가
    /// Insert; a second row for the same user fails with `Conflict`
    async fn insert(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError>;

    /// 사용자의 기존 레코드를 제자리에서 갱신, 없으면 false
    /// Update the user's record in place; `false` if it no longer exists
    async fn update_for_user(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError>;

    /// 현재 코드가 `old_code`인 레코드만 새 코드로 교체 (compare-and-swap)
    /// Replace the code only if the record still holds `old_code`
    async fn rotate(
        &mut self,
        old_code: &str,
        new_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError>;

    /// 코드로 삭제, 없으면 false
    async fn delete_by_code(&mut self, code: &str) -> Result<bool, PersistenceError>;

    /// 있으면 갱신, 없으면 추가
    /// Find-by-user, then update in place or insert
    async fn upsert(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        if self.find_by_user(user_id).await?.is_some()
            && self.update_for_user(user_id, code, expires_at).await?
        {
            return Ok(());
        }
        self.insert(user_id, code, expires_at).await
    }

    /// 커밋
    async fn commit(self: Box<Self>) -> Result<(), PersistenceError>;
}

/// Refresh Token 해싱 (DB 저장용, SHA-256 hex)
/// Hash a refresh code for storage; raw codes never hit the database
pub fn hash_refresh_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Refresh Token Repository (PostgreSQL)
/// Refresh token store backed by the `user_refresh_tokens` table
#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn begin(&self) -> Result<Box<dyn RefreshTokenUnitOfWork>, PersistenceError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgRefreshTokenUnitOfWork { tx }))
    }
}

/// PostgreSQL 트랜잭션 기반 작업 단위
pub struct PgRefreshTokenUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

fn record_from_row(row: &PgRow) -> RefreshTokenRecord {
    RefreshTokenRecord {
        id: row.get("id"),
        user_id: row.get::<i64, _>("user_id") as u64,
        code: row.get("code_hash"),
        expires_at: row.get("expires_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl RefreshTokenUnitOfWork for PgRefreshTokenUnitOfWork {
    async fn find_by_user(
        &mut self,
        user_id: u64,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, code_hash, expires_at, created_at, updated_at
            FROM user_refresh_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id as i64)  // DB에는 i64로 저장
        .fetch_optional(&mut self.tx)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn find_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<RefreshTokenRecord>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, code_hash, expires_at, created_at, updated_at
            FROM user_refresh_tokens
            WHERE code_hash = $1
            "#,
        )
        .bind(hash_refresh_code(code))
        .fetch_optional(&mut self.tx)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn insert(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO user_refresh_tokens (user_id, code_hash, expires_at, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            "#,
        )
        .bind(user_id as i64)
        .bind(hash_refresh_code(code))
        .bind(expires_at)
        .execute(&mut self.tx)
        .await?;

        Ok(())
    }

    async fn update_for_user(
        &mut self,
        user_id: u64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        let result = sqlx::query(
            r#"
            UPDATE user_refresh_tokens
            SET code_hash = $2, expires_at = $3, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id as i64)
        .bind(hash_refresh_code(code))
        .bind(expires_at)
        .execute(&mut self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn rotate(
        &mut self,
        old_code: &str,
        new_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        // 동시에 같은 코드를 교환하면 행 잠금 해제 후 WHERE가 재평가되어 한쪽만 성공
        let result = sqlx::query(
            r#"
            UPDATE user_refresh_tokens
            SET code_hash = $2, expires_at = $3, updated_at = NOW()
            WHERE code_hash = $1
            "#,
        )
        .bind(hash_refresh_code(old_code))
        .bind(hash_refresh_code(new_code))
        .bind(expires_at)
        .execute(&mut self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_code(&mut self, code: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_refresh_tokens
            WHERE code_hash = $1
            "#,
        )
        .bind(hash_refresh_code(code))
        .execute(&mut self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        let this = *self;
        this.tx.commit().await?;
        Ok(())
    }
}
