use crate::error::GatewayError;
use crate::forward::forward;
use crate::middleware::cors_layer;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use relay_core::{CorsConfig, HealthStatus, InvocationRequest, InvocationResult};
use relay_lambda::Invoker;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    /// Target every `/invoke-lambda` call is forwarded to.
    pub invoker: Arc<dyn Invoker>,
}

/// The Forwarding Service.
pub struct GatewayServer;

impl GatewayServer {
    /// Build the router with permissive development CORS.
    pub fn build_default(invoker: Arc<dyn Invoker>) -> Router {
        Self::build(invoker, &CorsConfig::default())
    }

    /// Build the router with the given cross-origin policy.
    pub fn build(invoker: Arc<dyn Invoker>, cors: &CorsConfig) -> Router {
        let state = Arc::new(AppState { invoker });

        Router::new()
            .route("/invoke-lambda", post(invoke_handler))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors))
            .with_state(state)
    }
}

/// Serve `app` until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Relay gateway listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Relay gateway stopped");
    Ok(())
}

async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

async fn invoke_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InvocationRequest>, JsonRejection>,
) -> Result<Json<InvocationResult>, GatewayError> {
    let Json(request) = payload?;

    let invocation_id = Uuid::new_v4();
    let span = info_span!(
        "invoke",
        invocation_id = %invocation_id,
        target = %state.invoker.target()
    );

    async move {
        match forward(state.invoker.as_ref(), request.value).await {
            Ok(result) => {
                info!("Invocation succeeded");
                Ok(Json(result))
            }
            Err(e) => {
                error!(
                    kind = e.kind(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Invocation failed"
                );
                Err(GatewayError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
