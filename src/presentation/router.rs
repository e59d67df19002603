use crate::application::fee_history_watcher::FeeHistoryHandle;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_fee_history, health_check, select_duration, stream_fee_history,
};
use axum::routing::{get, put};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/fee-history", get(get_fee_history))
        .route("/fee-history/duration", put(select_duration))
        .route("/fee-history/events", get(stream_fee_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `signal` resolves.
///
/// The watcher is stopped as soon as the signal fires, which ends every open
/// event stream so graceful shutdown can drain the remaining connections.
pub async fn serve_until<F>(
    listener: TcpListener,
    router: Router,
    fee_history: FeeHistoryHandle,
    signal: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            signal.await;
            tracing::info!("Shutdown requested, stopping fee history watcher");
            fee_history.shutdown().await;
        })
        .await
}
