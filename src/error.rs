use thiserror::Error;

/// Every failure in a generation flow maps to exactly one of these kinds.
/// All of them are terminal for the current invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Configuration error: {0}")]
    MissingConfiguration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Timed out after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Download error: {0}")]
    Download(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, PredictionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PredictionError::MissingConfiguration("API token is required".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: API token is required"
        );

        let err = PredictionError::Api {
            status: 422,
            body: "invalid version".into(),
        };
        assert_eq!(err.to_string(), "API error (422): invalid version");

        let err = PredictionError::Timeout { attempts: 60 };
        assert_eq!(err.to_string(), "Timed out after 60 status checks");

        let err = PredictionError::GenerationFailed("boom".into());
        assert_eq!(err.to_string(), "Generation failed: boom");
    }
}
