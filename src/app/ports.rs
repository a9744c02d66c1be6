use async_trait::async_trait;

/// Outbound HTTP boundary. Implemented by `infra::http_client::ReqwestHttp`;
/// tests substitute canned responses.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Performs a single GET. Non-2xx statuses are returned as results, not errors;
    /// `Err` is reserved for transport failures.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpGetResult, String>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
