// Domain layer - Fee history models and sample expansion
pub mod fee_history;
