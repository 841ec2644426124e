use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use std::sync::OnceLock;

static DUMMY_PASSWORD_HASH: OnceLock<Option<String>> = OnceLock::new();

/// 비밀번호 해싱 (Argon2, PHC 문자열)
/// Hash a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// 비밀번호 검증
/// Verify a password against a stored PHC hash
///
/// 해시가 손상된 경우에도 false (호출자에게는 단순 불일치로 보임)
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// 없는 계정용 더미 PHC 해시 (프로세스당 한 번 생성)
/// Dummy PHC hash used to equalise the cost of the unknown-email path
pub fn dummy_password_hash() -> Option<&'static str> {
    DUMMY_PASSWORD_HASH
        .get_or_init(|| match hash_password("dummy-password-for-unknown-accounts") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!("Failed to create dummy password hash: {}", e);
                None
            }
        })
        .as_deref()
}

/// 더미 해시에 대해 검증만 수행하고 결과는 버림
pub fn verify_dummy_password(password: &str) {
    if let Some(hash) = dummy_password_hash() {
        let _ = verify_password(password, hash);
    }
}
