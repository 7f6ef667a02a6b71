/// External API clients module
use crate::domain::{ApodMedia, BrowsePage, NeoLookupResponse};
use crate::errors::{ApiError, ApiResult};
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("neoscope/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// NASA NeoWs client (lookup and browse)
pub struct NeoClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl NeoClient {
    pub fn new(base_url: String, api_key: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            api_key,
        })
    }

    /// Look up a single asteroid by its NeoWs identifier.
    pub async fn lookup(&self, id: &str) -> ApiResult<NeoLookupResponse> {
        let url = format!("{}/neo/{}", self.base_url.trim_end_matches('/'), id);
        let mut req = self.http_client.get_client().get(&url);

        if !self.api_key.is_empty() {
            req = req.query(&[("api_key", &self.api_key)]);
        }

        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "NeoWs lookup failed with status {}",
                resp.status()
            )));
        }

        let parsed = resp.json::<NeoLookupResponse>().await?;
        Ok(parsed)
    }

    /// Fetch the first browse page of the catalog.
    pub async fn browse(&self) -> ApiResult<BrowsePage> {
        let url = format!("{}/neo/browse", self.base_url.trim_end_matches('/'));
        let mut req = self.http_client.get_client().get(&url);

        if !self.api_key.is_empty() {
            req = req.query(&[("api_key", &self.api_key)]);
        }

        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "NeoWs browse failed with status {}",
                resp.status()
            )));
        }

        let page = resp.json::<BrowsePage>().await?;
        Ok(page)
    }
}

/// NASA APOD client
pub struct ApodClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(base_url: String, api_key: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            api_key,
        })
    }

    /// Fetch the Astronomy Picture of the Day for a given date.
    pub async fn fetch(&self, date: NaiveDate) -> ApiResult<ApodMedia> {
        let mut req = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[("date", date.to_string())]);

        if !self.api_key.is_empty() {
            req = req.query(&[("api_key", &self.api_key)]);
        }

        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "APOD request failed with status {}",
                resp.status()
            )));
        }

        let media = resp.json::<ApodMedia>().await?;
        Ok(media)
    }
}
