use crate::errors::{ConfigError, FetchError};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub trait FragmentSource: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub struct HttpFragmentSource {
    client: Client,
    origin: Option<String>,
}

impl HttpFragmentSource {
    pub fn new(origin: Option<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            origin: origin.map(|origin| origin.trim_end_matches('/').to_string()),
        })
    }

    /// Resolves a page-relative url (`/bms/...`) against the configured origin.
    pub fn resolve(&self, url: &str) -> String {
        match &self.origin {
            Some(origin) if url.starts_with('/') => format!("{origin}{url}"),
            _ => url.to_string(),
        }
    }
}

impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let absolute = self.resolve(url);
        debug!(url = %absolute, "GET fragment");

        let response = self
            .client
            .get(&absolute)
            .send()
            .await
            .map_err(|err| FetchError::transport(&absolute, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(&absolute, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| FetchError::transport(&absolute, err))
    }
}
