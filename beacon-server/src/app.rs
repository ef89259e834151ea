use crate::config::ServerConfig;
use crate::hub::{HubHandle, HubStats};
use crate::signaling::{HeartbeatSettings, SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared by every HTTP and WebSocket handler.
pub struct AppState {
    pub signaling: SignalingService,
    pub hub: HubHandle,
    pub heartbeat: HeartbeatSettings,
}

impl AppState {
    /// Creates the outbound channel map and spawns the hub that writes to it.
    pub fn new(config: &ServerConfig) -> Self {
        let signaling = SignalingService::new();
        let hub = HubHandle::spawn(Arc::new(signaling.clone()), &config.hub);

        Self {
            signaling,
            hub,
            heartbeat: config.heartbeat(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/", get(index))
        .route("/ws", get(ws_handler))
        .route("/stats", get(stats))
        .layer(cors)
        .with_state(state)
}

async fn index() -> &'static str {
    "WebRTC Signaling Server"
}

async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<HubStats>, StatusCode> {
    state.hub.stats().await.map(Json).map_err(|e| {
        error!("Stats unavailable: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn serve<F>(config: ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(&config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    info!("Signaling server stopped");
    Ok(())
}
