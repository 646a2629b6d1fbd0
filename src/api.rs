//! HTTP command surface
//!
//! A thin forwarding layer: `POST /command` hands the JSON command string to
//! the shared dispatcher and reports `{"success": true}` once dispatch
//! completes — internal apologies are still a completed dispatch. Commands
//! are serialized through a mutex so no two are ever processed concurrently.
//! Unlike the interactive prompt, the command text is forwarded verbatim
//! (not lowercased).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::sync::{Mutex, Notify};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::automation::SearchDriver;
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::navigate::UrlOpener;
use crate::speech::Speaker;
use crate::Result;

/// Shared state for API handlers
pub struct ApiState<V, D, O> {
    /// The dispatcher; the mutex is the command-serialization point
    pub dispatcher: Mutex<Dispatcher<V, D, O>>,
    /// Signalled when an Exit command asks the server to stop
    pub shutdown: Notify,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Dispatch a command forwarded from the web interface
async fn command<V, D, O>(
    State(state): State<Arc<ApiState<V, D, O>>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>)
where
    V: Speaker + 'static,
    D: SearchDriver + 'static,
    O: UrlOpener + 'static,
{
    let Some(command) = body.get("command").and_then(|v| v.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Command is required" })),
        );
    };

    let mut dispatcher = state.dispatcher.lock().await;
    match dispatcher.dispatch(command).await {
        Ok(()) => {
            if !dispatcher.is_running() {
                // Exit intent: let the serve loop wind down after we reply
                state.shutdown.notify_one();
            }
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(e) => {
            tracing::error!(error = %e, "dispatcher-level failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
        }
    }
}

/// Build the command router
pub fn router<V, D, O>(state: Arc<ApiState<V, D, O>>, config: &ServerConfig) -> Router
where
    V: Speaker + 'static,
    D: SearchDriver + 'static,
    O: UrlOpener + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/command", post(command::<V, D, O>))
        .with_state(state);

    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

/// Serve the command endpoint until Exit or Ctrl-C, then tear down
///
/// # Errors
///
/// Returns error if the listener cannot bind or the server fails
pub async fn serve<V, D, O>(mut dispatcher: Dispatcher<V, D, O>, config: &ServerConfig) -> Result<()>
where
    V: Speaker + 'static,
    D: SearchDriver + 'static,
    O: UrlOpener + 'static,
{
    dispatcher.start();

    let state = Arc::new(ApiState {
        dispatcher: Mutex::new(dispatcher),
        shutdown: Notify::new(),
    });

    let app = router(Arc::clone(&state), config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "command server listening");

    let shutdown_signal = {
        let state = Arc::clone(&state);
        async move {
            tokio::select! {
                () = state.shutdown.notified() => {
                    tracing::info!("exit command received, shutting down");
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupt received, shutting down");
                }
            }
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    state.dispatcher.lock().await.shutdown().await;
    Ok(())
}
