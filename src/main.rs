use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use medsum::api::server;
use medsum::api::types::AppContext;
use medsum::config::{self, Config};
use medsum::corpus::Corpus;
use medsum::summarize::{GeminiClient, SummarizeError, Summarizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("medsum starting v{}", config::APP_VERSION);

    let config = Config::from_env();
    let corpus = Arc::new(Corpus::load());

    let summarizer = match GeminiClient::from_config(&config) {
        Ok(client) => {
            tracing::info!(model = %config.gemini_model, "model stage enabled");
            Some(Arc::new(Summarizer::new(Box::new(client))))
        }
        Err(SummarizeError::MissingApiKey) => {
            tracing::warn!(
                "GEMINI_API_KEY not set; serving deterministic corpus summaries only"
            );
            None
        }
        Err(e) => return Err(e.into()),
    };

    let addr = config.socket_addr();
    let ctx = AppContext::new(corpus, summarizer, Arc::new(config));

    server::serve(ctx, &addr).await
}
