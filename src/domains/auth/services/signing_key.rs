use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use crate::shared::errors::ConfigurationError;

/// HS256 서명에 필요한 최소 시크릿 길이 (바이트)
/// Minimum secret length for HS256, matching SHA-256's output size
pub const MIN_SECRET_BYTES: usize = 32;

/// 토큰 서명 알고리즘
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// 대칭 서명 키
/// Symmetric signing key derived from the configured secret
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// 설정된 시크릿에서 키 생성 (순수 함수, 부수효과 없음)
    /// Derive the key from the configured secret
    pub fn derive(secret: &str) -> Result<Self, ConfigurationError> {
        let bytes = secret.as_bytes();
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(ConfigurationError::WeakSigningSecret {
                min: MIN_SECRET_BYTES,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}
