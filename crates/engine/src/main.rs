//! Delve engine - turn runner.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use delve_engine::infrastructure::{
    resources::InMemoryResources, scripts::LoggingScriptExecutor, settings::EngineConfig,
};
use delve_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delve_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Delve engine");

    let config = EngineConfig::from_env()?;
    let app = App::open(
        &config,
        Arc::new(InMemoryResources::new()),
        Arc::new(LoggingScriptExecutor::new()),
    )?;

    let mut interval = tokio::time::interval(config.turn_interval());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut turns: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(turns, "Interrupted, shutting down");
                break;
            }
            _ = interval.tick() => {
                match app.advance_turn() {
                    Ok(_) => {}
                    Err(e) if e.is_recoverable() => {
                        tracing::warn!(tick = app.current_tick(), error = %e, "Turn finished with failures");
                    }
                    Err(e) => return Err(e.into()),
                }
                turns += 1;

                if turns % config.commit_every == 0 {
                    let version = app.commit()?;
                    tracing::debug!(turns, version, "Committed");
                }
                if config.max_turns != 0 && turns >= config.max_turns {
                    tracing::info!(turns, "Reached turn limit");
                    break;
                }
            }
        }
    }

    app.shutdown()?;
    Ok(())
}

/// Load `.env.local` and `.env` from the repository root, if present.
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
