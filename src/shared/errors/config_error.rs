use thiserror::Error;

/// 설정 에러 (시작 시점에만 발생, 복구 불가)
/// Configuration error (startup-time, fatal)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// 필수 환경변수 없음
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// 환경변수 값이 잘못됨
    /// Environment variable has an invalid value
    #[error("Invalid value for environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    /// 서명 키가 너무 짧음 (HS256은 최소 32바이트)
    /// Signing secret is too short for HS256
    #[error("Signing secret must be at least {min} bytes, got {actual}")]
    WeakSigningSecret { min: usize, actual: usize },

    /// 토큰 서명 실패 (키 설정 문제)
    /// Token signing failed (key misconfiguration)
    #[error("Failed to sign token: {0}")]
    Signing(String),
}
