use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    timeout_seconds: Option<u64>,
}

impl HttpClientConfig {
    pub fn new(timeout_seconds: Option<u64>) -> Self {
        Self { timeout_seconds }
    }

    pub fn new_tracing_client(&self) -> anyhow::Result<ClientWithMiddleware> {
        let mut builder = reqwest::Client::builder();

        if let Some(seconds) = self.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }

        let client = builder.build()?;

        Ok(reqwest_middleware::ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build())
    }
}
