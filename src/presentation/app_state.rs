// Application state for HTTP handlers
use crate::application::fee_history_watcher::FeeHistoryHandle;

#[derive(Clone)]
pub struct AppState {
    pub fee_history: FeeHistoryHandle,
}
