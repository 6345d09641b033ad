use crate::{
    config::PredictionConfig,
    error::{PredictionError, Result},
    models::{
        CreatePredictionResponse, GenerationRequest, PredictionHandle, PredictionStatus,
        StatusResponse,
    },
    prediction::traits::PredictionApi,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP implementation of [`PredictionApi`] against a Replicate-style
/// prediction service.
///
/// Construction validates the bearer token up front, so a missing token is a
/// configuration error raised before any network call. Each request gets a
/// per-call timeout; a dropped future abandons the in-flight request and the
/// connection is released with it.
#[derive(Clone)]
pub struct ReplicateApi {
    client: Client,
    api_token: String,
    base_url: String,
    submit_timeout: Duration,
    poll_timeout: Duration,
    download_timeout: Duration,
}

impl ReplicateApi {
    pub fn new(config: &PredictionConfig) -> Result<Self> {
        let api_token = config
            .api_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                PredictionError::MissingConfiguration(
                    "API token is required (set REPLICATE_API_TOKEN)".into(),
                )
            })?;

        Ok(Self {
            client: Client::new(),
            api_token,
            base_url: config.base_url().to_string(),
            submit_timeout: config.submit_timeout,
            poll_timeout: config.poll_timeout,
            download_timeout: config.download_timeout,
        })
    }

    async fn error_from_response(
        operation: &str,
        response: reqwest::Response,
    ) -> PredictionError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        log::error!("❌ {} returned HTTP {}: {}", operation, status, body);
        PredictionError::Api { status, body }
    }
}

#[async_trait]
impl PredictionApi for ReplicateApi {
    async fn create(&self, request: &GenerationRequest) -> Result<PredictionHandle> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_token)
            .timeout(self.submit_timeout)
            .json(&request.payload())
            .send()
            .await
            .map_err(|e| PredictionError::Connection(format!("create request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("create", response).await);
        }

        let body: CreatePredictionResponse = response.json().await.map_err(|e| {
            PredictionError::MalformedResponse(format!("create response is not valid JSON: {}", e))
        })?;

        let status_url = body
            .urls
            .and_then(|urls| urls.get)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                PredictionError::MalformedResponse(
                    "create response is missing the status check URL (urls.get)".into(),
                )
            })?;

        Ok(PredictionHandle { status_url })
    }

    async fn poll(&self, handle: &PredictionHandle) -> Result<PredictionStatus> {
        let response = self
            .client
            .get(&handle.status_url)
            .bearer_auth(&self.api_token)
            .timeout(self.poll_timeout)
            .send()
            .await
            .map_err(|e| PredictionError::Connection(format!("status check failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("status check", response).await);
        }

        let body: StatusResponse = response.json().await.map_err(|e| {
            PredictionError::MalformedResponse(format!("status response is not valid JSON: {}", e))
        })?;

        Ok(body.into())
    }

    async fn download(&self, output_url: &str) -> Result<Vec<u8>> {
        // Output URLs are pre-signed delivery URLs; no auth header here.
        let response = self
            .client
            .get(output_url)
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| PredictionError::Connection(format!("image download failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(PredictionError::Download(format!(
                "image download returned HTTP {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PredictionError::Download(format!("reading image bytes failed: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_a_configuration_error() {
        let config = PredictionConfig::new();
        let err = ReplicateApi::new(&config).err().unwrap();
        assert!(matches!(err, PredictionError::MissingConfiguration(_)));
    }

    #[test]
    fn test_blank_token_is_a_configuration_error() {
        let config = PredictionConfig::new().with_token("   ");
        let err = ReplicateApi::new(&config).err().unwrap();
        assert!(matches!(err, PredictionError::MissingConfiguration(_)));
    }

    #[test]
    fn test_valid_token_builds_api() {
        let config = PredictionConfig::new().with_token("r8_test");
        assert!(ReplicateApi::new(&config).is_ok());
    }
}
