use crate::domain::model::FetchOutcome;
use async_trait::async_trait;
use std::collections::HashMap;
use url::Url;

/// Request client seam: one HTTP GET against a fully formed URL, body parsed
/// as JSON. Any failure along the way is captured into the outcome, never
/// propagated.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get_json(&self, url: &Url) -> FetchOutcome;
}

/// Where the formatted answer line lands.
pub trait OutputSink: Send + Sync {
    fn write_text(&self, text: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn request_headers(&self) -> HashMap<String, String>;
}
