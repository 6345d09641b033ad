//! Imgen: an async client for hosted image-generation prediction services.
//!
//! The flow is create → poll → fetch: [`ImageRequestClient::generate`]
//! submits a prompt, polls the prediction to a terminal status at a fixed
//! rate, downloads the produced image, and mirrors every step to a
//! caller-supplied [`ProgressSink`].

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod prediction;

pub use config::PredictionConfig;
pub use error::{PredictionError, Result};
pub use models::*;
pub use prediction::{ImageRequestClient, PredictionApi, ProgressSink, ReplicateApi};
