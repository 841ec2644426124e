use thiserror::Error;

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// 영속성 계층 에러
/// Errors surfaced by the persistence collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// 유니크 제약 위반 (동시 insert 경쟁에서 짐)
    /// Unique constraint violated; the caller lost an insert race
    #[error("Unique constraint violated")]
    Conflict,

    /// 그 외 데이터베이스 에러
    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return Self::Conflict;
            }
        }
        Self::Database(err.to_string())
    }
}
