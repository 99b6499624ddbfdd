use std::error::Error;
use std::sync::Arc;

use llm_service::config::decoding_config::DecodingConfig;
use llm_service::config::default_config::{config_fallback, config_primary};
use llm_service::service::LlmService;
use llm_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    dotenvy::dotenv().ok();

    // Global INFO output plus the library-scoped layer for backend calls.
    let env_filter = telemetry::env_filter_with_level("info", Level::INFO);

    // Library events render through the crate-scoped layer (timestamps,
    // span durations); the plain formatter takes everything else, so no
    // event is printed twice.
    let app_layer = fmt::layer().with_target(false).with_filter(filter::filter_fn(
        |meta| !meta.target().starts_with(telemetry::TARGET_PREFIX),
    ));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(telemetry::layer())
        .with(app_layer)
        .init();

    // Resolve backend configs before the HTTP surface exists. A failed load
    // of both tiers aborts the process; chat traffic is never accepted with
    // no working backend behind it.
    let primary = config_primary()?;
    let fallback = config_fallback()?;

    let svc = match LlmService::load(primary, fallback, DecodingConfig::default(), Some(10)).await {
        Ok(svc) => {
            tracing::info!(
                model = %svc.active_config().model,
                tier = ?svc.tier(),
                "generation backend ready"
            );
            svc
        }
        Err(err) => {
            tracing::error!(error = %err, "no usable generation backend; refusing to start");
            return Err(err.into());
        }
    };

    api::start(Arc::new(svc)).await?;

    Ok(())
}
