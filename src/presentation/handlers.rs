// HTTP request handlers
use crate::application::fee_history_state::FeeHistoryView;
use crate::domain::fee_history::ChartDuration;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;

#[derive(Deserialize)]
pub struct SelectDuration {
    pub duration: ChartDuration,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current fee history view for the selected duration
pub async fn get_fee_history(State(state): State<Arc<AppState>>) -> Json<FeeHistoryView> {
    Json(state.fee_history.current())
}

/// Switch the selected duration; responds with the view the switch surfaced
pub async fn select_duration(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectDuration>,
) -> Result<Json<FeeHistoryView>, StatusCode> {
    state
        .fee_history
        .select(body.duration)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error selecting duration {}: {}", body.duration, e);
            StatusCode::SERVICE_UNAVAILABLE
        })
}

/// Server-sent events, one JSON view per change, starting with the current one
pub async fn stream_fee_history(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.fee_history.subscribe())
        .map(|view| Event::default().event("fee-history").json_data(view));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
