use crate::{
    error::Result,
    models::{GenerationRequest, PredictionHandle, PredictionStatus, ProgressEvent},
};
use async_trait::async_trait;

/// Transport seam for the prediction service: one create call, repeated
/// status checks, one download. Implementations own the auth and wire
/// details; the client owns the polling protocol.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn create(&self, request: &GenerationRequest) -> Result<PredictionHandle>;

    async fn poll(&self, handle: &PredictionHandle) -> Result<PredictionStatus>;

    async fn download(&self, output_url: &str) -> Result<Vec<u8>>;
}

/// Caller-injected progress capability. The client reports the lifecycle of
/// each invocation here; what the caller does with it (edit a chat message,
/// print to a console) is its own business. Notification is infallible so a
/// broken UI cannot mask the generation outcome.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn notify(&self, event: ProgressEvent);
}
