use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use crate::domains::auth::models::User;
use crate::domains::auth::services::password;
use crate::shared::errors::PersistenceError;

/// 사용자 조회 및 비밀번호 검증 (외부 identity 시스템)
/// Identity collaborator: user lookup and password verification
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    // 이메일로 사용자 조회 (로그인용)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError>;

    // ID로 사용자 조회 (토큰 갱신용)
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, PersistenceError>;

    /// 비밀번호 검증 (느린 salted 해시, 상수 시간 비교)
    async fn verify_password(&self, user: &User, password: &str) -> bool;

    /// 없는 사용자에 대해 `verify_password`와 같은 비용의 검증을 수행 (결과는 버림)
    /// Spend the cost of a real password check when the email is unknown
    async fn verify_dummy_password(&self, password: &str);
}

/// User Repository (PostgreSQL + Argon2)
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        // 더미 해시를 미리 만들어 첫 로그인 실패가 느려지지 않게 함
        password::dummy_password_hash();
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get::<i64, _>("id") as u64,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        username: row.get("username"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl IdentityVerifier for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, username, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, username, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn verify_password(&self, user: &User, password: &str) -> bool {
        // Argon2는 CPU를 많이 쓰므로 blocking 스레드에서 실행
        let plaintext = password.to_string();
        let stored_hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
            .await
            .unwrap_or(false)
    }

    async fn verify_dummy_password(&self, password: &str) {
        let plaintext = password.to_string();

        let _ = tokio::task::spawn_blocking(move || password::verify_dummy_password(&plaintext)).await;
    }
}
