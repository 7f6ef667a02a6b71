/// Application configuration module
use std::env;

const DEFAULT_NEO_API_URL: &str = "https://api.nasa.gov/neo/rest/v1";
const DEFAULT_APOD_API_URL: &str = "https://api.nasa.gov/planetary/apod";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub nasa_api_key: String,
    pub neo_api_url: String,
    pub apod_api_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("NASA_API_KEY").ok(),
            env::var("NEO_API_URL").ok(),
            env::var("APOD_API_URL").ok(),
        )
    }

    fn from_vars(
        nasa_api_key: Option<String>,
        neo_api_url: Option<String>,
        apod_api_url: Option<String>,
    ) -> anyhow::Result<Self> {
        let nasa_api_key = nasa_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("NASA_API_KEY is required"))?;

        Ok(Self {
            nasa_api_key,
            neo_api_url: neo_api_url.unwrap_or_else(|| DEFAULT_NEO_API_URL.to_string()),
            apod_api_url: apod_api_url.unwrap_or_else(|| DEFAULT_APOD_API_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_an_error() {
        assert!(AppConfig::from_vars(None, None, None).is_err());
        assert!(AppConfig::from_vars(Some("   ".to_string()), None, None).is_err());
    }

    #[test]
    fn test_defaults_applied_when_urls_unset() {
        let config = AppConfig::from_vars(Some("DEMO_KEY".to_string()), None, None).unwrap();
        assert_eq!(config.nasa_api_key, "DEMO_KEY");
        assert_eq!(config.neo_api_url, DEFAULT_NEO_API_URL);
        assert_eq!(config.apod_api_url, DEFAULT_APOD_API_URL);
    }

    #[test]
    fn test_url_overrides_honored() {
        let config = AppConfig::from_vars(
            Some("DEMO_KEY".to_string()),
            Some("http://localhost:8080/neo".to_string()),
            Some("http://localhost:8080/apod".to_string()),
        )
        .unwrap();
        assert_eq!(config.neo_api_url, "http://localhost:8080/neo");
        assert_eq!(config.apod_api_url, "http://localhost:8080/apod");
    }
}
