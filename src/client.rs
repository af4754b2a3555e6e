use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::models::RegionCode;

/// Thin GET client for the NWS API.
///
/// Every request carries the configured `User-Agent` and `Accept` headers and
/// is bounded by the configured timeout. Idle connections are not pooled, so
/// each call opens and closes its own connection. Dropping the returned future
/// aborts the request.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_str(&config.accept)?);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the active-alerts listing for one area
    pub fn alerts_url(&self, region: &RegionCode) -> String {
        format!("{}/alerts/active/area/{}", self.base_url, region)
    }

    /// Fetches `url` and returns its JSON body.
    ///
    /// Any failure is logged once at error level and handed back as a
    /// [`FetchError`]; callers treat it as "no data", never as fatal.
    pub async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.request(url).await.inspect_err(|e| {
            tracing::error!("Error fetching data from NWS: {}", e);
        })
    }

    async fn request(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })
    }
}
