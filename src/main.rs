use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use zippclip_recs::{
    api::{create_router, AppState},
    config::{Config, ProviderKind},
    services::providers::{google_ai::GoogleAiProvider, open_ai::OpenAiProvider, ModelProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let api_url = config.resolved_api_url();
    let provider: Arc<dyn ModelProvider> = match config.model_provider {
        ProviderKind::Google => Arc::new(GoogleAiProvider::new(
            config.model_api_key.clone(),
            api_url,
            config.model_name.clone(),
        )),
        ProviderKind::Openai => Arc::new(OpenAiProvider::new(
            config.model_api_key.clone(),
            api_url,
            config.model_name.clone(),
        )),
    };

    tracing::info!(
        provider = provider.name(),
        model = %config.model_name,
        "Model provider initialized"
    );

    let state = AppState::new(provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
