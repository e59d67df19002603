// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fee_api_repository;
