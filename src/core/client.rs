use crate::domain::model::{CalculationResult, FetchOutcome};
use crate::domain::ports::{ApiClient, ConfigProvider};
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP implementation of the request client. Header set and timeout come
/// from configuration at construction time.
pub struct HttpApiClient {
    client: Client,
}

impl HttpApiClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.request_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                CalcError::InvalidConfigValueError {
                    field: "headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| CalcError::InvalidConfigValueError {
                    field: format!("headers.{}", name),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self { client })
    }

    // Response status is deliberately not checked; only an unparseable body
    // counts as a failure.
    async fn try_get_json(&self, url: &Url) -> Result<CalculationResult> {
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!(status = %response.status(), "calculator API responded");

        let body = response.text().await?;
        let payload: CalculationResult = serde_json::from_str(&body)?;
        Ok(payload)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_json(&self, url: &Url) -> FetchOutcome {
        match self.try_get_json(url).await {
            Ok(payload) => {
                tracing::debug!(?payload, "fetched calculation payload");
                FetchOutcome::Payload(payload)
            }
            Err(err) => {
                tracing::warn!(error = %err, "calculator request failed");
                FetchOutcome::Failed(err)
            }
        }
    }
}
