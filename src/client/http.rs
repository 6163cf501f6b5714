use async_trait::async_trait;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

/// Minimal HTTP seam for the version lookup. Kept as a trait so tests can
/// substitute canned responses.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, anyhow::Error>;
}

/// Blocking ureq client executed on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct UreqHttpClient;

#[async_trait]
impl HttpClient for UreqHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, anyhow::Error> {
        let response = tokio::task::spawn_blocking(move || -> Result<HttpResponse, anyhow::Error> {
            let response = ureq::get(&request.url).call()?;
            let status_code = response.status();
            let mut body = Vec::new();
            response.into_reader().read_to_end(&mut body)?;
            Ok(HttpResponse { status_code, body })
        })
        .await??;
        Ok(response)
    }
}
