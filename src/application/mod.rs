// Application layer - Refresh cache, scheduling and the watcher facade
pub mod duration_cache;
pub mod fee_history_repository;
pub mod fee_history_state;
pub mod fee_history_watcher;
pub mod refresh_scheduler;
pub mod ticker;
