use std::sync::Arc;

use clap::Parser;
use profitcast_model::Predictor;
use profitcast_server::{AppState, Config, router};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::parse();

    // Load once, before the listener binds. A failed load degrades the
    // service instead of aborting it: health stays up, predict answers 503.
    let artifact_dir = config.artifact_dir();
    let predictor = match Predictor::load(&artifact_dir) {
        Ok(p) => Some(p),
        Err(err) => {
            warn!(dir = %artifact_dir.display(), %err, "artifact load failed, serving degraded");
            None
        }
    };

    let state = Arc::new(AppState { predictor });
    let app = router(config.mount, state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, mount = ?config.mount, "profitcast v{} listening", env!("CARGO_PKG_VERSION"));
    axum::serve(listener, app).await?;
    Ok(())
}
