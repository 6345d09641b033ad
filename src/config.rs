use std::env;
use std::time::Duration;

/// Default endpoint for creating predictions.
pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1/predictions";

/// Pinned model version. Opaque to this crate; the service treats it as an
/// identifier and so do we.
pub const DEFAULT_MODEL_VERSION: &str =
    "ac732df83cea7fff18b8472768c88ad041fa750ff7682a21affe81863cbe77e4";

/// Configuration for the prediction service client.
///
/// The API token is the one required value; everything else has a default.
/// Poll timing is configurable so tests can run the loop without wall-clock
/// sleeps, but the 2s/60-attempt defaults are the compatibility contract.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    pub api_token: Option<String>,
    pub base_url: Option<String>,
    pub model_version: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub submit_timeout: Duration,
    pub poll_timeout: Duration,
    pub download_timeout: Duration,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        PredictionConfig {
            api_token: None,
            base_url: None,
            model_version: None,
            poll_interval: Duration::from_secs(2),
            max_poll_attempts: 60,
            submit_timeout: Duration::from_secs(30),
            poll_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(60),
        }
    }
}

impl PredictionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_token = env::var("REPLICATE_API_TOKEN").ok();
        let base_url = env::var("PREDICTION_BASE_URL").ok();
        let model_version = env::var("PREDICTION_MODEL_VERSION").ok();

        PredictionConfig {
            api_token,
            base_url,
            model_version,
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn model_version(&self) -> &str {
        self.model_version
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = PredictionConfig::new();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_poll_attempts, 60);
        assert_eq!(config.submit_timeout, Duration::from_secs(30));
        assert_eq!(config.download_timeout, Duration::from_secs(60));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model_version(), DEFAULT_MODEL_VERSION);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PredictionConfig::new()
            .with_token("r8_test")
            .with_base_url("http://localhost:9090/predictions")
            .with_model_version("deadbeef")
            .with_poll_interval(Duration::ZERO)
            .with_max_poll_attempts(3);

        assert_eq!(config.api_token.as_deref(), Some("r8_test"));
        assert_eq!(config.base_url(), "http://localhost:9090/predictions");
        assert_eq!(config.model_version(), "deadbeef");
        assert_eq!(config.poll_interval, Duration::ZERO);
        assert_eq!(config.max_poll_attempts, 3);
    }
}
