use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::EnvFilter;
use vocal_analyzer::{Analyzer, GeminiAnalyzer};
use vocal_app::controller::AppController;
use vocal_app::profile;
use vocal_app::state::AppState;
use vocal_store::{JsonFileStorage, MemoryStorage};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run());

    // stdin reads cannot be cancelled; don't wait on them forever
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if atty::is(atty::Stream::Stdout) {
        builder.init();
    } else {
        builder.json().init();
    }
}

async fn run() -> anyhow::Result<()> {
    profile::init_user_config()?;
    let config = profile::load_user_config()?;
    let local_path = profile::local_storage_path(&config)?;
    tracing::info!("Saved words at {}", local_path.display());

    let capacity = config.channel_capacity;
    let state = Arc::new(AppState::new(
        config,
        Arc::new(JsonFileStorage::new(local_path)),
        Arc::new(MemoryStorage::new()),
    ));

    // Install/startup hook
    if let Err(e) = state.words.init().await {
        tracing::error!("Failed to initialize saved words: {}", e);
    }

    let (analyzer, key_missing): (Arc<dyn Analyzer>, bool) = {
        let config = state.config.read().await;
        (
            Arc::new(GeminiAnalyzer::from_config(&config.analyzer)),
            config.analyzer.api_key.is_empty(),
        )
    };

    let metadata = analyzer.metadata();
    tracing::info!("Using {} analyzer at {}", metadata.name, metadata.model_url);
    if metadata.requires_api_key && key_missing {
        tracing::warn!("No {} API key configured, set VOCAL_API_KEY", metadata.name);
    }

    let controller = AppController::new(state, capacity);
    let mut tasks = controller.spawn_tasks(analyzer);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}
