use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use hotline_api::auth::AppStateInner;
use hotline_api::config::Config;
use hotline_api::routes;
use hotline_db::{DEFAULT_ADMIN_PASSWORD, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotline=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.admin.password == DEFAULT_ADMIN_PASSWORD {
        warn!("Seeded admin uses the built-in default password; set HOTLINE_ADMIN_PASSWORD");
    }
    if !config.require_token {
        warn!("Token enforcement is off: any caller can read messages and change admin status");
    }

    // The store lives exactly as long as the server; everything is lost on exit.
    let store = Store::open(&config.admin);
    let state = AppStateInner::new(store, &config);

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Hotline server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Hotline server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
