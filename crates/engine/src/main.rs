//! UgcLab Collector - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ugclab_engine::api;
use ugclab_engine::infrastructure::{clock::SystemClock, json_store::JsonFileStore, ports::ClockPort};
use ugclab_engine::{App, CollectorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the collector may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ugclab_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting UgcLab Collector");

    let config = CollectorConfig::from_env();

    // An unreadable data file aborts startup rather than being overwritten.
    let store = Arc::new(JsonFileStore::open(&config.data_dir).await?);
    tracing::info!(path = %store.path().display(), "Participant store ready");

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let app = Arc::new(App::new(store, clock));

    let router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()));

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("Endpoints: POST /api/data/ugc, POST /api/data/time, GET /api/data/{{participantId}}, GET /api/data/export/all?format=json|csv, GET /api/health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

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

/// Any origin unless `CORS_ALLOWED_ORIGINS` names specific ones.
fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // The participant app posts JSON, which triggers CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = match allowed_origins {
        None | Some("*") => return cors.allow_origin(Any),
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect(),
    };

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS has no valid origins, allowing any origin");
        return cors.allow_origin(Any);
    }
    cors.allow_origin(origins)
}
