use crate::decode::{decode_enhancement, decode_generation, server_message};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use shared::api::PromptRequest;
use shared::chart::GenerationResult;
use shared::error::ClientError;
use shared::settings::EndpointConfig;
use std::sync::LazyLock;

// Each background job runs on its own short-lived runtime, so pooled
// connections must not outlive the request that opened them.

/// Client for services that expect credentials (keeps a cookie jar).
static CREDENTIALED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .cookie_store(true)
        .pool_max_idle_per_host(0)
        .build()
        .expect("failed to build HTTP client")
});

static PLAIN_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .expect("failed to build HTTP client")
});

/// A service that can turn prompts into charts and improve prompt wording.
///
/// Note: Uses async_trait for object safety
#[async_trait::async_trait]
pub trait PromptService: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<GenerationResult, ClientError>;

    async fn enhance(&self, prompt: &str) -> Result<String, ClientError>;
}

/// One HTTP service as described by an [`EndpointConfig`].
pub struct EndpointClient {
    http: Client,
    config: EndpointConfig,
}

impl EndpointClient {
    pub fn new(config: EndpointConfig) -> Self {
        let http = if config.send_credentials {
            CREDENTIALED_HTTP.clone()
        } else {
            PLAIN_HTTP.clone()
        };
        Self { http, config }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    fn network_error(&self, err: reqwest::Error) -> ClientError {
        ClientError::Network {
            endpoint: self.config.name.clone(),
            message: err.to_string(),
            server_message: None,
        }
    }

    async fn post_prompt(&self, url: String, prompt: &str) -> Result<String, ClientError> {
        let req = PromptRequest {
            prompt: prompt.trim().to_string(),
        };
        let resp = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;
        self.read_body(resp).await
    }

    /// Read a response body, turning non-2xx statuses into errors that carry
    /// the service's own message when it sent one.
    async fn read_body(&self, resp: Response) -> Result<String, ClientError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.network_error(e))?;
        if !status.is_success() {
            return Err(ClientError::Network {
                endpoint: self.config.name.clone(),
                message: format!("{} error: {}", self.config.name, status),
                server_message: server_message(&body),
            });
        }
        Ok(body)
    }

    /// GET the probe path. Succeeds on any 2xx.
    pub async fn probe(&self) -> Result<(), ClientError> {
        let Some(url) = self.config.probe_url() else {
            return Ok(());
        };
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.network_error(e))?;
        self.read_body(resp).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl PromptService for EndpointClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult, ClientError> {
        let body = self.post_prompt(self.config.generate_url(), prompt).await?;
        decode_generation(&self.config.name, &body)
    }

    async fn enhance(&self, prompt: &str) -> Result<String, ClientError> {
        let body = self.post_prompt(self.config.enhance_url(), prompt).await?;
        decode_enhancement(&self.config.name, &body)
    }
}

/// Download raw bytes from an absolute URL (used to export remote images).
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ClientError> {
    let network = |message: String| ClientError::Network {
        endpoint: url.to_string(),
        message,
        server_message: None,
    };
    let resp = PLAIN_HTTP
        .get(url)
        .send()
        .await
        .map_err(|e| network(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(network(format!("download error: {}", resp.status())));
    }
    let bytes = resp.bytes().await.map_err(|e| network(e.to_string()))?;
    Ok(bytes.to_vec())
}
