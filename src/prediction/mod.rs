pub mod replicate;
pub mod traits;

pub use replicate::ReplicateApi;
pub use traits::{PredictionApi, ProgressSink};

use crate::{
    config::PredictionConfig,
    error::{PredictionError, Result},
    models::{GenerationRequest, PredictionHandle, PredictionStatus, ProgressEvent},
};
use uuid::Uuid;

/// Client for one-shot image generation against an asynchronous prediction
/// service: submit a job, poll it to a terminal status, download the image.
///
/// Each `generate` call is an independent flow with no state shared across
/// invocations; the client can be cloned freely. Dropping the returned
/// future mid-flight abandons whichever request is in progress.
#[derive(Clone)]
pub struct ImageRequestClient<A: PredictionApi> {
    api: A,
    config: PredictionConfig,
}

impl ImageRequestClient<ReplicateApi> {
    /// Builds a client over the HTTP transport. Fails with a configuration
    /// error, before any network call, when the API token is absent.
    pub fn new(config: PredictionConfig) -> Result<Self> {
        let api = ReplicateApi::new(&config)?;
        Ok(Self { api, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(PredictionConfig::from_env())
    }
}

impl<A: PredictionApi> ImageRequestClient<A> {
    /// Builds a client over a custom transport.
    pub fn with_api(api: A, config: PredictionConfig) -> Self {
        Self { api, config }
    }

    /// Submits a generation job. The caller guarantees a non-empty prompt;
    /// it is not re-validated here.
    pub async fn submit(&self, prompt: &str) -> Result<PredictionHandle> {
        let request = GenerationRequest::from_prompt(prompt, &self.config);
        log::debug!(
            "🎨 Submitting generation job (model version {})",
            request.model_version
        );
        self.api.create(&request).await
    }

    /// Polls the job to a terminal status and returns its output URL.
    ///
    /// Fixed-rate polling, sleep-then-fetch each tick: 2s interval and a
    /// 60-attempt budget by default (~120s). No backoff, no jitter.
    pub async fn await_completion(&self, handle: &PredictionHandle) -> Result<String> {
        for attempt in 1..=self.config.max_poll_attempts {
            tokio::time::sleep(self.config.poll_interval).await;

            match self.api.poll(handle).await? {
                PredictionStatus::Pending => {
                    log::debug!(
                        "⏳ Still pending (attempt {}/{})",
                        attempt,
                        self.config.max_poll_attempts
                    );
                }
                PredictionStatus::Succeeded { output_url } => {
                    return output_url.filter(|url| !url.trim().is_empty()).ok_or_else(|| {
                        PredictionError::MalformedResponse(
                            "prediction succeeded but reported no output URL".into(),
                        )
                    });
                }
                PredictionStatus::Failed { detail } => {
                    return Err(PredictionError::GenerationFailed(detail));
                }
            }
        }

        Err(PredictionError::Timeout {
            attempts: self.config.max_poll_attempts,
        })
    }

    /// Downloads the produced image. The caller owns the bytes from here on.
    pub async fn fetch_image(&self, output_url: &str) -> Result<Vec<u8>> {
        self.api.download(output_url).await
    }

    /// Full flow: submit, poll to completion, download. Every step is
    /// mirrored to the sink; every failure is both reported there and
    /// returned, so nothing crosses this boundary silently. No partial
    /// results: either the complete image comes back or no bytes do.
    pub async fn generate(&self, prompt: &str, sink: &dyn ProgressSink) -> Result<Vec<u8>> {
        let request_id = Uuid::new_v4();
        let _timer = crate::logger::timer("image generation");
        log::info!("🎨 [{}] Generation requested", request_id);

        let handle = match self.submit(prompt).await {
            Ok(handle) => handle,
            Err(e) => return Self::fail(sink, request_id, e).await,
        };
        sink.notify(ProgressEvent::Accepted).await;
        log::info!("✅ [{}] Job accepted, polling {}", request_id, handle.status_url);

        let output_url = match self.await_completion(&handle).await {
            Ok(url) => url,
            Err(e) => return Self::fail(sink, request_id, e).await,
        };
        log::info!("🏁 [{}] Prediction succeeded: {}", request_id, output_url);

        let bytes = match self.fetch_image(&output_url).await {
            Ok(bytes) => bytes,
            Err(e) => return Self::fail(sink, request_id, e).await,
        };

        sink.notify(ProgressEvent::Succeeded).await;
        log::info!("🖼️  [{}] Image ready ({} bytes)", request_id, bytes.len());
        Ok(bytes)
    }

    async fn fail(
        sink: &dyn ProgressSink,
        request_id: Uuid,
        error: PredictionError,
    ) -> Result<Vec<u8>> {
        log::error!("❌ [{}] {}", request_id, error);
        sink.notify(ProgressEvent::Failed {
            message: error.to_string(),
        })
        .await;
        Err(error)
    }
}
