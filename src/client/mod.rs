mod builder;

use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use rquest::Client as RquestClient;
use url::Url;

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub content: String,
}

pub struct Client {
    inner: RquestClient,
    base_url: String,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Fetches an absolute URL, normally one produced by [`Client::build_url`]
    /// so the URL that gets logged is byte-for-byte the URL requested.
    pub async fn get(&self, url: &str) -> Result<ClientResponse> {
        self.request(url).await
    }

    pub fn build_url(&self, path: &str) -> Result<String> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid base URL: {}", e)))?;

        let full_url = base
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid path: {}", e)))?;

        Ok(full_url.to_string())
    }

    async fn request(&self, url: &str) -> Result<ClientResponse> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let is_success = response.status().is_success();

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                url: url.to_string(),
            }
            .into());
        }

        // WordPress serves UTF-8; invalid bytes degrade to U+FFFD rather
        // than failing the page.
        let bytes = response.bytes().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to read response body: {}", e))
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        Ok(ClientResponse { status, content })
    }
}
