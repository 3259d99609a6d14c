use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, debug};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if there is one.
    let dotenv = dotenvy::dotenv();

    let filter = telemetry::env_filter_with_level("info", Level::DEBUG);

    tracing_subscriber::registry()
        .with(filter)
        .with(telemetry::layer())
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(filter::filter_fn(|meta| {
                    !telemetry::is_library_target(meta.target())
                })),
        )
        .try_init()?;

    if let Err(err) = dotenv {
        debug!(error = %err, "no .env file loaded; using process environment only");
    }

    api::start().await?;

    Ok(())
}
