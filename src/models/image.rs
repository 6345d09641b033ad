use serde::Deserialize;
use serde_json::json;

use crate::config::PredictionConfig;

/// Fixed keyword prefixed to every prompt to bias the model's output style.
pub const TRIGGER_TOKEN: &str = "TOK ";

/// Fixed negative prompt attached to every generation.
pub const NEGATIVE_PROMPT: &str = "worst quality, low quality, blurry, pixelated, \
     extra limbs, extra fingers, malformed hands, bad anatomy, deformed, \
     text, watermark, logo, signature, out of frame, out of focus";

/// Fixed output aspect ratio.
pub const ASPECT_RATIO: &str = "3:4";

/// Immutable job description submitted to the prediction service.
/// Built once per invocation and discarded after the create call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub aspect_ratio: String,
    pub model_version: String,
}

impl GenerationRequest {
    /// Builds the request for a user prompt: trigger token prefixed, fixed
    /// negative prompt and aspect ratio, configured model version.
    pub fn from_prompt(prompt: &str, config: &PredictionConfig) -> Self {
        GenerationRequest {
            prompt: format!("{}{}", TRIGGER_TOKEN, prompt),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            aspect_ratio: ASPECT_RATIO.to_string(),
            model_version: config.model_version().to_string(),
        }
    }

    /// JSON body for the create call, in the service's wire shape.
    pub fn payload(&self) -> serde_json::Value {
        json!({
            "version": self.model_version,
            "input": {
                "prompt": self.prompt,
                "negative_prompt": self.negative_prompt,
                "aspect_ratio": self.aspect_ratio,
            }
        })
    }
}

/// Handle returned by the create call. Lives only for the polling phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionHandle {
    pub status_url: String,
}

/// Decoded outcome of one status check. Re-fetched each poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionStatus {
    Pending,
    Succeeded { output_url: Option<String> },
    Failed { detail: String },
}

impl PredictionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PredictionStatus::Pending)
    }
}

/// Progress notification delivered to the caller's sink. One `Accepted`
/// follows a successful submit; exactly one of `Succeeded`/`Failed` ends
/// the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Accepted,
    Succeeded,
    Failed { message: String },
}

/// Wire shape of the create response. Only `urls.get` matters to us.
#[derive(Debug, Deserialize)]
pub struct CreatePredictionResponse {
    pub urls: Option<PredictionUrls>,
}

#[derive(Debug, Deserialize)]
pub struct PredictionUrls {
    pub get: Option<String>,
}

/// Wire shape of a status check response.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: Option<String>,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl From<StatusResponse> for PredictionStatus {
    fn from(response: StatusResponse) -> Self {
        match response.status.as_deref() {
            Some("succeeded") => PredictionStatus::Succeeded {
                output_url: response.output,
            },
            Some("failed") => PredictionStatus::Failed {
                detail: response
                    .error
                    .unwrap_or_else(|| "no error detail reported".to_string()),
            },
            // "starting", "processing", absent: keep polling.
            _ => PredictionStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_prefixes_trigger_token() {
        let config = PredictionConfig::new();
        let request = GenerationRequest::from_prompt("a cat", &config);
        assert_eq!(request.prompt, format!("{}{}", TRIGGER_TOKEN, "a cat"));
        assert_eq!(request.negative_prompt, NEGATIVE_PROMPT);
        assert_eq!(request.aspect_ratio, ASPECT_RATIO);
    }

    #[test]
    fn test_create_payload_wire_shape() {
        let config = PredictionConfig::new().with_model_version("deadbeef");
        let request = GenerationRequest::from_prompt("a cat", &config);
        let payload = request.payload();

        assert_eq!(payload["version"], "deadbeef");
        assert_eq!(payload["input"]["prompt"], format!("{}a cat", TRIGGER_TOKEN));
        assert_eq!(payload["input"]["negative_prompt"], NEGATIVE_PROMPT);
        assert_eq!(payload["input"]["aspect_ratio"], ASPECT_RATIO);
    }

    #[test]
    fn test_status_decoding() {
        let pending: StatusResponse =
            serde_json::from_str(r#"{"status": "processing"}"#).unwrap();
        assert_eq!(PredictionStatus::from(pending), PredictionStatus::Pending);

        let absent: StatusResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(PredictionStatus::from(absent), PredictionStatus::Pending);

        let succeeded: StatusResponse =
            serde_json::from_str(r#"{"status": "succeeded", "output": "http://img/1.png"}"#)
                .unwrap();
        assert_eq!(
            PredictionStatus::from(succeeded),
            PredictionStatus::Succeeded {
                output_url: Some("http://img/1.png".to_string())
            }
        );

        let failed: StatusResponse =
            serde_json::from_str(r#"{"status": "failed", "error": "boom"}"#).unwrap();
        assert_eq!(
            PredictionStatus::from(failed),
            PredictionStatus::Failed {
                detail: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_create_response_decoding() {
        let ok: CreatePredictionResponse =
            serde_json::from_str(r#"{"urls": {"get": "http://svc/p/1"}}"#).unwrap();
        assert_eq!(
            ok.urls.and_then(|u| u.get).as_deref(),
            Some("http://svc/p/1")
        );

        let missing: CreatePredictionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(missing.urls.is_none());
    }
}
