use imgen::{ImageRequestClient, PredictionConfig, ProgressEvent, ProgressSink};
use async_trait::async_trait;
use std::env;
use std::fs;

/// Minimal sink for the demo: progress goes to the console. A chat bot
/// would implement the same trait by editing its status message.
struct ConsoleSink;

#[async_trait]
impl ProgressSink for ConsoleSink {
    async fn notify(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Accepted => log::info!("⏳ Request accepted, generating..."),
            ProgressEvent::Succeeded => log::info!("🖼️  Image generated"),
            ProgressEvent::Failed { message } => log::error!("❌ {}", message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    imgen::logger::init_with_config(
        imgen::logger::LoggerConfig::development().with_level(imgen::logger::LogLevel::Debug),
    )?;

    if env::var("REPLICATE_API_TOKEN").is_err() {
        log::error!("❌ REPLICATE_API_TOKEN is not set");
    }

    let prompt = env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let prompt = if prompt.trim().is_empty() {
        log::warn!("⚠️  No prompt given, using a default one");
        "a serene landscape with mountains and a lake at sunset".to_string()
    } else {
        prompt
    };

    log::info!("🔄 Creating prediction client...");
    let client = match ImageRequestClient::new(PredictionConfig::from_env()) {
        Ok(client) => {
            log::info!("✅ Prediction client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize prediction client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🎨 Generating image for prompt: {}", prompt);
    match client.generate(&prompt, &ConsoleSink).await {
        Ok(bytes) => {
            let filename = format!("generated_image_{}.png", chrono::Utc::now().timestamp());
            fs::write(&filename, &bytes)?;
            log::info!("💾 Image saved to: {} ({} bytes)", filename, bytes.len());
        }
        Err(e) => {
            log::error!("❌ Image generation failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
