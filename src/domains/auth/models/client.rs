use serde::Deserialize;

/// 정적으로 등록된 머신 클라이언트
/// Statically configured machine client
///
/// 프로세스 시작 시 설정에서 로드되고 이후 읽기 전용.
#[derive(Clone, Deserialize)]
pub struct Client {
    pub id: String,
    pub secret: String,
    #[serde(default)]
    pub audiences: Vec<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .field("audiences", &self.audiences)
            .finish()
    }
}
