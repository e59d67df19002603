// Presentation layer - HTTP surface over the fee history watcher
pub mod app_state;
pub mod handlers;
pub mod router;
